use chrono::NaiveDate;
use innovation_assessment::assessment::{
    AssessmentMode, AssessmentReport, AssessmentSession, AssessmentSettings, MissingAnswerPolicy,
    QuestionBank, RatingScaleKind, RecommendationTable, ResponseImporter, ScoringConfig,
    ScoringEngine,
};
use innovation_assessment::config;
use innovation_assessment::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::io::Read;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The live wizard plus the settings stateless scoring requests run under.
#[derive(Clone)]
pub(crate) struct AssessmentState {
    pub(crate) session: Arc<AssessmentSession>,
    pub(crate) settings: AssessmentSettings,
}

pub(crate) struct ScoredResponses {
    pub(crate) answered: usize,
    pub(crate) report: AssessmentReport,
}

/// Import a response CSV against the standard question bank and score it.
pub(crate) fn score_responses<R: Read>(
    reader: R,
    settings: &AssessmentSettings,
) -> Result<ScoredResponses, AppError> {
    let bank = QuestionBank::standard();
    let responses = ResponseImporter::from_reader(reader, &bank, settings.scale.scale())?;
    let scores = ScoringEngine::new(ScoringConfig::from(settings)).score(&bank, &responses);

    Ok(ScoredResponses {
        answered: responses.count_answered(),
        report: AssessmentReport::build(&scores, &RecommendationTable::standard()),
    })
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

pub(crate) fn parse_scale(raw: &str) -> Result<RatingScaleKind, String> {
    config::parse_scale(raw).ok_or_else(|| format!("unknown rating scale '{raw}' (four_point, six_point)"))
}

pub(crate) fn parse_mode(raw: &str) -> Result<AssessmentMode, String> {
    config::parse_mode(raw)
        .ok_or_else(|| format!("unknown assessment mode '{raw}' (gap_analysis, single_state)"))
}

pub(crate) fn parse_missing_answers(raw: &str) -> Result<MissingAnswerPolicy, String> {
    config::parse_missing_answers(raw).ok_or_else(|| {
        format!("unknown missing-answer policy '{raw}' (exclude_unanswered, zero_fill)")
    })
}
