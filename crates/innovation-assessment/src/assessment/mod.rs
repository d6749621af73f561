//! Pillar-based innovation self-assessment: question bank, rating scales,
//! gap scoring, maturity classification and the intake/answer/results wizard.

pub mod classifier;
pub mod domain;
pub mod import;
pub mod intake;
mod question_bank;
pub mod report;
mod responses;
pub mod router;
pub mod scoring;
mod session;
mod settings;
mod snapshot;
mod validation;
mod wizard;

#[cfg(test)]
mod tests;

pub use classifier::{maturity_tier, MaturityTier, MissingRecommendationError, RecommendationTable};
pub use domain::{
    AnswerKey, AssessmentMode, InvalidRatingError, Pillar, Rating, RatingScale, RatingScaleError,
    RatingScaleKind, RatingTag, ScaleOption,
};
pub use import::{ResponseImportError, ResponseImporter};
pub use intake::{
    is_valid_email, IntakeField, IntakeFieldKind, IntakeForm, IntakeSchema, IntakeSchemaError,
    UnknownFieldError,
};
pub use question_bank::{PillarSection, QuestionBank, QuestionBankError};
pub use report::views::{
    AssessmentReportSummary, FocusPillarView, FocusReason, PillarResultView,
};
pub use report::{AssessmentReport, ChartSeries, GapChart, GapChartPoint, PillarResult};
pub use responses::ResponseStore;
pub use router::assessment_router;
pub use scoring::{AssessmentScores, MissingAnswerPolicy, PillarScore, ScoringConfig, ScoringEngine};
pub use session::AssessmentSession;
pub use settings::AssessmentSettings;
pub use snapshot::{IntakeFieldView, PillarOverview, QuestionView, WizardSnapshot};
pub use validation::ValidationError;
pub use wizard::{WizardAction, WizardController, WizardError, WizardPhase};
