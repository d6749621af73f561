use super::domain::Pillar;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PillarSection {
    pub pillar: Pillar,
    pub questions: Vec<String>,
}

impl PillarSection {
    pub fn new<I, S>(pillar: Pillar, questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pillar,
            questions: questions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered pillars with their ordered question texts. Questions are addressed
/// by pillar and zero-based position, never by text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    sections: Vec<PillarSection>,
}

impl QuestionBank {
    pub fn new(sections: Vec<PillarSection>) -> Result<Self, QuestionBankError> {
        if sections.is_empty() {
            return Err(QuestionBankError::Empty);
        }

        for (position, section) in sections.iter().enumerate() {
            if sections[..position]
                .iter()
                .any(|earlier| earlier.pillar == section.pillar)
            {
                return Err(QuestionBankError::DuplicatePillar(section.pillar));
            }
        }

        Ok(Self { sections })
    }

    pub fn standard() -> Self {
        Self {
            sections: standard_sections(),
        }
    }

    pub fn sections(&self) -> &[PillarSection] {
        &self.sections
    }

    pub fn section_at(&self, index: usize) -> Option<&PillarSection> {
        self.sections.get(index)
    }

    pub fn section(&self, pillar: Pillar) -> Option<&PillarSection> {
        self.sections
            .iter()
            .find(|section| section.pillar == pillar)
    }

    pub fn pillars(&self) -> impl Iterator<Item = Pillar> + '_ {
        self.sections.iter().map(|section| section.pillar)
    }

    pub fn pillar_count(&self) -> usize {
        self.sections.len()
    }

    pub fn questions_for(&self, pillar: Pillar) -> &[String] {
        self.section(pillar)
            .map(|section| section.questions.as_slice())
            .unwrap_or(&[])
    }

    pub fn question(&self, pillar: Pillar, index: usize) -> Option<&str> {
        self.questions_for(pillar).get(index).map(String::as_str)
    }

    pub fn total_questions(&self) -> usize {
        self.sections
            .iter()
            .map(|section| section.questions.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionBankError {
    #[error("question bank must contain at least one pillar")]
    Empty,
    #[error("pillar {0} appears more than once in the question bank")]
    DuplicatePillar(Pillar),
}

fn standard_sections() -> Vec<PillarSection> {
    vec![
        PillarSection::new(
            Pillar::Strategy,
            [
                "Do you understand how innovation aligns with your long-term career objectives",
                "Are you aware of the problems or gaps you want to solve through innovation",
                "How well do your focus areas match your skills and expertise",
                "Are your focus areas aligned with current or future industry trends",
                "Do you maintain a balance between incremental and radical innovations",
                "Do you set timelines and milestones for innovation initiatives",
            ],
        ),
        PillarSection::new(
            Pillar::Capacity,
            [
                "How clearly do you define problem statements before ideation",
                "Do you break innovation work into stages (idea → prototype → test → improve)",
                "How effectively do you collaborate with others on innovation projects",
                "How comfortable are you working in cross-functional teams",
                "How effectively do you utilize available resources",
                "Do you regularly invest in learning new tools or technologies",
            ],
        ),
        PillarSection::new(
            Pillar::Discipline,
            [
                "Do you take initiative to lead innovation efforts without being asked",
                "How well do you align innovation activities with broader goals",
                "How consistently do you track progress on innovation activities",
                "Do you maintain a balance between incremental and radical innovations",
                "How accountable are you for innovation results",
                "Do you define clear success criteria for innovation initiatives",
            ],
        ),
        PillarSection::new(
            Pillar::Performance,
            [
                "How effectively do your ideas address real user or business problems",
                "How consistently do you deliver measurable value through innovation",
                "Do you understand how your innovations create economic or strategic value",
                "Do your solutions continue to generate value over time",
                "How well do you understand AI concepts relevant to your work",
                "How aware are you of ethical considerations in AI usage",
            ],
        ),
    ]
}
