use super::domain::{AssessmentMode, Pillar};
use serde::Serialize;
use std::fmt;

/// User-facing reasons a guarded wizard transition did not happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    MissingRequiredFields {
        fields: Vec<String>,
    },
    InvalidEmail,
    PillarIncomplete {
        pillar: Pillar,
        unanswered: usize,
        mode: AssessmentMode,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingRequiredFields { .. } => {
                write!(f, "Please fill in all required fields.")
            }
            ValidationError::InvalidEmail => write!(f, "Please enter a valid email address."),
            ValidationError::PillarIncomplete { mode, .. } => match mode {
                AssessmentMode::GapAnalysis => write!(
                    f,
                    "Please answer all questions (Current and Desired) before continuing."
                ),
                AssessmentMode::SingleState => {
                    write!(f, "Please answer all questions before continuing.")
                }
            },
        }
    }
}

impl std::error::Error for ValidationError {}
