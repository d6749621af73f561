use super::domain::{AssessmentMode, Pillar};
use super::intake::IntakeFieldKind;
use super::wizard::WizardPhase;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct IntakeFieldView {
    pub name: String,
    pub kind: IntakeFieldKind,
    pub required: bool,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub text: String,
    pub current: Option<u8>,
    pub desired: Option<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PillarOverview {
    pub pillar: Pillar,
    pub label: &'static str,
    pub question_count: usize,
    pub active: bool,
    pub complete: bool,
}

/// Everything a presentation layer needs to draw the current wizard step.
#[derive(Debug, Clone, Serialize)]
pub struct WizardSnapshot {
    pub phase: WizardPhase,
    pub step_label: &'static str,
    pub mode: AssessmentMode,
    pub pillar_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pillar: Option<Pillar>,
    pub progress_percent: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_error: Option<String>,
    pub current_pillar_complete: bool,
    pub intake: Vec<IntakeFieldView>,
    pub questions: Vec<QuestionView>,
    pub pillars: Vec<PillarOverview>,
}
