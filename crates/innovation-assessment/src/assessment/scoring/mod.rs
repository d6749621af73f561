mod rules;

use super::domain::{AssessmentMode, Pillar, RatingTag};
use super::question_bank::QuestionBank;
use super::responses::ResponseStore;
use super::settings::AssessmentSettings;
use serde::{Deserialize, Serialize};

/// How unanswered questions enter a pillar average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingAnswerPolicy {
    /// Average over answered questions only.
    #[default]
    ExcludeUnanswered,
    /// Count every unanswered question as a rating of 0.
    ZeroFill,
}

impl MissingAnswerPolicy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ExcludeUnanswered => "Exclude unanswered",
            Self::ZeroFill => "Zero fill",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub mode: AssessmentMode,
    pub missing_answers: MissingAnswerPolicy,
}

impl From<&AssessmentSettings> for ScoringConfig {
    fn from(settings: &AssessmentSettings) -> Self {
        Self {
            mode: settings.mode,
            missing_answers: settings.missing_answers,
        }
    }
}

/// Stateless engine averaging ratings per pillar.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ScoringConfig {
        self.config
    }

    pub fn score(&self, bank: &QuestionBank, responses: &ResponseStore) -> AssessmentScores {
        let policy = self.config.missing_answers;
        let pillars = bank
            .sections()
            .iter()
            .map(|section| {
                let current =
                    rules::pillar_mean(bank, responses, section.pillar, RatingTag::Current, policy);
                let desired = match self.config.mode {
                    AssessmentMode::GapAnalysis => Some(rules::pillar_mean(
                        bank,
                        responses,
                        section.pillar,
                        RatingTag::Desired,
                        policy,
                    )),
                    AssessmentMode::SingleState => None,
                };

                PillarScore {
                    pillar: section.pillar,
                    current: current.mean,
                    desired: desired.as_ref().map(|mean| mean.mean),
                    answered_current: current.answered,
                    answered_desired: desired.as_ref().map_or(0, |mean| mean.answered),
                    question_count: section.questions.len(),
                }
            })
            .collect();

        AssessmentScores { pillars }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarScore {
    pub pillar: Pillar,
    pub current: f32,
    pub desired: Option<f32>,
    pub answered_current: usize,
    pub answered_desired: usize,
    pub question_count: usize,
}

impl PillarScore {
    /// Desired minus current, when the desired state was captured.
    pub fn gap(&self) -> Option<f32> {
        self.desired.map(|desired| desired - self.current)
    }
}

/// Per-pillar scores in question bank order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentScores {
    pillars: Vec<PillarScore>,
}

impl AssessmentScores {
    pub fn get(&self, pillar: Pillar) -> Option<&PillarScore> {
        self.pillars.iter().find(|score| score.pillar == pillar)
    }

    pub fn pillars(&self) -> &[PillarScore] {
        &self.pillars
    }

    pub fn iter(&self) -> impl Iterator<Item = &PillarScore> {
        self.pillars.iter()
    }

    pub fn len(&self) -> usize {
        self.pillars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pillars.is_empty()
    }
}
