use super::domain::{AssessmentMode, RatingScaleKind};
use super::scoring::MissingAnswerPolicy;
use serde::{Deserialize, Serialize};

/// Knobs selecting between the survey variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSettings {
    pub scale: RatingScaleKind,
    pub mode: AssessmentMode,
    pub missing_answers: MissingAnswerPolicy,
    pub allow_back_navigation: bool,
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            scale: RatingScaleKind::FourPoint,
            mode: AssessmentMode::GapAnalysis,
            missing_answers: MissingAnswerPolicy::ExcludeUnanswered,
            allow_back_navigation: true,
        }
    }
}
