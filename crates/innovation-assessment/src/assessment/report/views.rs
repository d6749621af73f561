use super::super::classifier::MaturityTier;
use super::super::domain::Pillar;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PillarResultView {
    pub pillar: Pillar,
    pub pillar_label: &'static str,
    pub current: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f32>,
    pub answered_current: usize,
    pub answered_desired: usize,
    pub question_count: usize,
    pub maturity: MaturityTier,
    pub maturity_label: &'static str,
    pub color: &'static str,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusReason {
    LargestGap,
    LowestCurrent,
}

impl FocusReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LargestGap => "Largest gap between current and desired state",
            Self::LowestCurrent => "Lowest current score",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FocusPillarView {
    pub pillar: Pillar,
    pub pillar_label: &'static str,
    pub reason: FocusReason,
    pub reason_label: &'static str,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReportSummary {
    pub pillars: Vec<PillarResultView>,
    pub overall_current: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_desired: Option<f32>,
    pub overall_maturity: MaturityTier,
    pub overall_maturity_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<FocusPillarView>,
}
