//! Innovation maturity self-assessment.
//!
//! The crate models a three-phase survey wizard (organisation intake, per-pillar
//! question answering, results) together with the scoring engine that turns
//! Likert-scale answers into per-pillar maturity tiers and recommendations.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
