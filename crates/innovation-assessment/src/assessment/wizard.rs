use super::classifier::RecommendationTable;
use super::domain::{AssessmentMode, InvalidRatingError, Pillar, RatingScale, RatingTag};
use super::intake::{IntakeFieldKind, IntakeForm, IntakeSchema, UnknownFieldError};
use super::question_bank::QuestionBank;
use super::report::AssessmentReport;
use super::responses::ResponseStore;
use super::scoring::{AssessmentScores, ScoringConfig, ScoringEngine};
use super::settings::AssessmentSettings;
use super::snapshot::{IntakeFieldView, PillarOverview, QuestionView, WizardSnapshot};
use super::validation::ValidationError;
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum WizardPhase {
    Intake,
    Answering { pillar_index: usize },
    Results,
}

impl WizardPhase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Intake => "Intake",
            Self::Answering { .. } => "Answering",
            Self::Results => "Results",
        }
    }
}

/// Actions a presentation layer can request, named in phase errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardAction {
    UpdateField,
    SubmitIntake,
    Answer,
    NextPillar,
    PreviousPillar,
    ViewResults,
}

impl WizardAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::UpdateField => "updating intake fields",
            Self::SubmitIntake => "submitting the intake form",
            Self::Answer => "answering questions",
            Self::NextPillar => "moving to the next pillar",
            Self::PreviousPillar => "moving to the previous pillar",
            Self::ViewResults => "viewing results",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    InvalidRating(#[from] InvalidRatingError),
    #[error(transparent)]
    UnknownField(#[from] UnknownFieldError),
    #[error("question {question} does not exist for pillar {pillar}")]
    UnknownQuestion { pillar: Pillar, question: usize },
    #[error("{} is not available during the {} phase", .action.label(), .phase.label())]
    WrongPhase {
        action: WizardAction,
        phase: WizardPhase,
    },
    #[error("{} ratings are not collected in {} mode", .tag.label(), .mode.label())]
    TagNotTracked { tag: RatingTag, mode: AssessmentMode },
    #[error("results can only be viewed from the final pillar")]
    NotOnFinalPillar,
    #[error("backward navigation is disabled for this assessment")]
    BackNavigationDisabled,
}

/// Owns the intake form and responses of one assessment and sequences
/// Intake -> Answering(pillar) -> Results through guarded transitions.
#[derive(Debug, Clone)]
pub struct WizardController {
    bank: QuestionBank,
    form: IntakeForm,
    responses: ResponseStore,
    engine: ScoringEngine,
    recommendations: RecommendationTable,
    settings: AssessmentSettings,
    phase: WizardPhase,
    validation_error: Option<ValidationError>,
}

impl WizardController {
    pub fn new(bank: QuestionBank, schema: IntakeSchema, settings: AssessmentSettings) -> Self {
        Self {
            bank,
            form: IntakeForm::new(schema),
            responses: ResponseStore::new(settings.scale.scale()),
            engine: ScoringEngine::new(ScoringConfig::from(&settings)),
            recommendations: RecommendationTable::standard(),
            settings,
            phase: WizardPhase::Intake,
            validation_error: None,
        }
    }

    pub fn standard(settings: AssessmentSettings) -> Self {
        Self::new(
            QuestionBank::standard(),
            IntakeSchema::organisation(),
            settings,
        )
    }

    pub fn with_recommendations(mut self, recommendations: RecommendationTable) -> Self {
        self.recommendations = recommendations;
        self
    }

    /// Answer on a custom scale instead of the one named by the settings.
    /// Ratings already stored are dropped.
    pub fn with_scale(mut self, scale: RatingScale) -> Self {
        self.responses = ResponseStore::new(scale);
        self
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn settings(&self) -> &AssessmentSettings {
        &self.settings
    }

    pub fn question_bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn intake(&self) -> &IntakeForm {
        &self.form
    }

    pub fn responses(&self) -> &ResponseStore {
        &self.responses
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation_error.as_ref()
    }

    /// Active pillar position: 0 during intake, the last pillar once results are shown.
    pub fn current_pillar_index(&self) -> usize {
        match self.phase {
            WizardPhase::Intake => 0,
            WizardPhase::Answering { pillar_index } => pillar_index,
            WizardPhase::Results => self.bank.pillar_count().saturating_sub(1),
        }
    }

    pub fn current_pillar(&self) -> Option<Pillar> {
        match self.phase {
            WizardPhase::Answering { pillar_index } => {
                self.bank.section_at(pillar_index).map(|section| section.pillar)
            }
            _ => None,
        }
    }

    pub fn update_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), WizardError> {
        let kind = self
            .form
            .schema()
            .field(name)
            .map(|field| field.kind)
            .ok_or_else(|| UnknownFieldError(name.to_owned()))?;

        let permitted = match self.phase {
            WizardPhase::Intake => true,
            WizardPhase::Answering { .. } => kind == IntakeFieldKind::Notes,
            WizardPhase::Results => false,
        };
        if !permitted {
            return Err(self.wrong_phase(WizardAction::UpdateField));
        }

        self.form.set(name, value)?;
        Ok(())
    }

    pub fn submit_intake(&mut self) -> Result<WizardPhase, WizardError> {
        if self.phase != WizardPhase::Intake {
            return Err(self.wrong_phase(WizardAction::SubmitIntake));
        }

        if let Err(error) = self.form.validate() {
            warn!(%error, "intake submission rejected");
            return Err(self.reject(error));
        }

        self.validation_error = None;
        self.phase = WizardPhase::Answering { pillar_index: 0 };
        info!(
            respondent = self.form.display_name().unwrap_or_default(),
            "intake accepted, starting pillar questions"
        );
        Ok(self.phase)
    }

    pub fn answer(
        &mut self,
        pillar: Pillar,
        question: usize,
        tag: RatingTag,
        value: impl Into<i64>,
    ) -> Result<(), WizardError> {
        let value = value.into();
        if !matches!(self.phase, WizardPhase::Answering { .. }) {
            return Err(self.wrong_phase(WizardAction::Answer));
        }

        if !self.settings.mode.tracks(tag) {
            return Err(WizardError::TagNotTracked {
                tag,
                mode: self.settings.mode,
            });
        }

        if self.bank.question(pillar, question).is_none() {
            return Err(WizardError::UnknownQuestion { pillar, question });
        }

        if let Err(error) = self.responses.set_rating(pillar, question, tag, value) {
            warn!(%pillar, question, ?tag, value, "rating rejected");
            return Err(error.into());
        }
        debug!(%pillar, question, ?tag, value, "rating recorded");

        if matches!(
            self.validation_error,
            Some(ValidationError::PillarIncomplete { .. })
        ) && self.is_current_pillar_complete()
        {
            self.validation_error = None;
        }

        Ok(())
    }

    pub fn next_pillar(&mut self) -> Result<WizardPhase, WizardError> {
        match self.phase {
            WizardPhase::Answering { pillar_index } => self.advance_from(pillar_index),
            _ => Err(self.wrong_phase(WizardAction::NextPillar)),
        }
    }

    pub fn view_results(&mut self) -> Result<WizardPhase, WizardError> {
        match self.phase {
            WizardPhase::Answering { pillar_index }
                if pillar_index + 1 == self.bank.pillar_count() =>
            {
                self.advance_from(pillar_index)
            }
            WizardPhase::Answering { .. } => Err(WizardError::NotOnFinalPillar),
            _ => Err(self.wrong_phase(WizardAction::ViewResults)),
        }
    }

    pub fn previous_pillar(&mut self) -> Result<WizardPhase, WizardError> {
        let WizardPhase::Answering { pillar_index } = self.phase else {
            return Err(self.wrong_phase(WizardAction::PreviousPillar));
        };

        if !self.settings.allow_back_navigation {
            return Err(WizardError::BackNavigationDisabled);
        }

        if pillar_index > 0 {
            self.phase = WizardPhase::Answering {
                pillar_index: pillar_index - 1,
            };
            self.validation_error = None;
            debug!(pillar_index = pillar_index - 1, "moved back one pillar");
        }

        Ok(self.phase)
    }

    /// Return to intake, dropping every answer and the free-text notes.
    pub fn restart(&mut self) {
        self.responses.clear();
        self.form.clear_notes();
        self.validation_error = None;
        self.phase = WizardPhase::Intake;
        info!("assessment restarted");
    }

    pub fn unanswered_in(&self, pillar: Pillar) -> usize {
        let question_count = self.bank.questions_for(pillar).len();
        (0..question_count)
            .flat_map(|question| {
                self.settings
                    .mode
                    .required_tags()
                    .iter()
                    .map(move |tag| (question, *tag))
            })
            .filter(|(question, tag)| self.responses.rating(pillar, *question, *tag).is_none())
            .count()
    }

    pub fn is_pillar_complete(&self, pillar: Pillar) -> bool {
        self.unanswered_in(pillar) == 0
    }

    pub fn is_current_pillar_complete(&self) -> bool {
        self.current_pillar()
            .is_some_and(|pillar| self.is_pillar_complete(pillar))
    }

    pub fn progress_percent(&self) -> f32 {
        match self.phase {
            WizardPhase::Intake => {
                let (filled, total) = self.form.required_progress();
                percentage(filled, total)
            }
            WizardPhase::Answering { .. } => {
                let tags = self.settings.mode.required_tags();
                let total = self.bank.total_questions() * tags.len();
                let answered = self
                    .responses
                    .iter()
                    .filter(|(key, _)| {
                        tags.contains(&key.tag) && self.bank.question(key.pillar, key.question).is_some()
                    })
                    .count();
                percentage(answered, total)
            }
            WizardPhase::Results => 100.0,
        }
    }

    pub fn scores(&self) -> AssessmentScores {
        self.engine.score(&self.bank, &self.responses)
    }

    /// Report over the current answers, regardless of phase.
    pub fn report(&self) -> AssessmentReport {
        AssessmentReport::build(&self.scores(), &self.recommendations)
    }

    /// The final report; only available once the wizard reached results.
    pub fn results(&self) -> Result<AssessmentReport, WizardError> {
        if self.phase != WizardPhase::Results {
            return Err(self.wrong_phase(WizardAction::ViewResults));
        }
        Ok(self.report())
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        let current_pillar = self.current_pillar();
        let step_label = match (self.phase, current_pillar) {
            (WizardPhase::Intake, _) => "Organisation Info",
            (WizardPhase::Answering { .. }, Some(pillar)) => pillar.label(),
            (WizardPhase::Answering { .. }, None) => "Answering",
            (WizardPhase::Results, _) => "Results",
        };

        let intake = self
            .form
            .schema()
            .fields()
            .iter()
            .map(|field| IntakeFieldView {
                name: field.name.clone(),
                kind: field.kind,
                required: field.is_required(),
                value: self.form.value(&field.name).unwrap_or_default().to_string(),
            })
            .collect();

        let questions = current_pillar
            .map(|pillar| {
                self.bank
                    .questions_for(pillar)
                    .iter()
                    .enumerate()
                    .map(|(index, text)| QuestionView {
                        index,
                        text: text.clone(),
                        current: self
                            .responses
                            .rating(pillar, index, RatingTag::Current)
                            .map(|rating| rating.value()),
                        desired: self
                            .responses
                            .rating(pillar, index, RatingTag::Desired)
                            .map(|rating| rating.value()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let pillars = self
            .bank
            .sections()
            .iter()
            .map(|section| PillarOverview {
                pillar: section.pillar,
                label: section.pillar.label(),
                question_count: section.questions.len(),
                active: current_pillar == Some(section.pillar),
                complete: self.is_pillar_complete(section.pillar),
            })
            .collect();

        WizardSnapshot {
            phase: self.phase,
            step_label,
            mode: self.settings.mode,
            pillar_index: self.current_pillar_index(),
            pillar: current_pillar,
            progress_percent: self.progress_percent(),
            validation_error: self.validation_error.as_ref().map(ToString::to_string),
            current_pillar_complete: self.is_current_pillar_complete(),
            intake,
            questions,
            pillars,
        }
    }

    fn advance_from(&mut self, pillar_index: usize) -> Result<WizardPhase, WizardError> {
        let Some(pillar) = self
            .bank
            .section_at(pillar_index)
            .map(|section| section.pillar)
        else {
            return Err(self.wrong_phase(WizardAction::NextPillar));
        };

        let unanswered = self.unanswered_in(pillar);
        if unanswered > 0 {
            warn!(%pillar, unanswered, "pillar incomplete, staying put");
            return Err(self.reject(ValidationError::PillarIncomplete {
                pillar,
                unanswered,
                mode: self.settings.mode,
            }));
        }

        self.validation_error = None;
        self.phase = if pillar_index + 1 < self.bank.pillar_count() {
            WizardPhase::Answering {
                pillar_index: pillar_index + 1,
            }
        } else {
            WizardPhase::Results
        };
        info!(%pillar, phase = self.phase.label(), "pillar completed");
        Ok(self.phase)
    }

    fn reject(&mut self, error: ValidationError) -> WizardError {
        self.validation_error = Some(error.clone());
        WizardError::Validation(error)
    }

    fn wrong_phase(&self, action: WizardAction) -> WizardError {
        WizardError::WrongPhase {
            action,
            phase: self.phase,
        }
    }
}

fn percentage(part: usize, total: usize) -> f32 {
    if total == 0 {
        return 100.0;
    }
    ((part as f32 / total as f32) * 100.0).min(100.0)
}
