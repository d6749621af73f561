use crate::infra::{deserialize_optional_date, score_responses, AppState, AssessmentState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use innovation_assessment::assessment::{
    assessment_router, AssessmentReport, AssessmentSession, AssessmentSettings, ChartSeries,
    FocusPillarView, MaturityTier, PillarResultView,
};
use innovation_assessment::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

const GAP_CHART_FILE: &str = "gap.svg";

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) responses_csv: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) assessed_on: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) include_chart: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    pub(crate) assessed_on: NaiveDate,
    pub(crate) settings: AssessmentSettings,
    pub(crate) answered: usize,
    pub(crate) pillars: Vec<PillarResultView>,
    pub(crate) overall_current: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) overall_desired: Option<f32>,
    pub(crate) overall_maturity: MaturityTier,
    pub(crate) overall_maturity_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) focus: Option<FocusPillarView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) chart: Option<ChartSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) gap_chart_svg: Option<String>,
}

pub(crate) fn with_assessment_routes(session: Arc<AssessmentSession>) -> axum::Router {
    assessment_router(session)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/assessment/score",
            axum::routing::post(score_endpoint),
        )
        .route(
            "/api/v1/assessment/results/gap.svg",
            axum::routing::get(gap_chart_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn score_endpoint(
    Extension(state): Extension<AssessmentState>,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let ScoreRequest {
        responses_csv,
        assessed_on,
        include_chart,
    } = payload;

    let scored = score_responses(Cursor::new(responses_csv.into_bytes()), &state.settings)?;
    Ok(Json(build_score_response(
        scored.report,
        scored.answered,
        state.settings,
        assessed_on.unwrap_or_else(|| Local::now().date_naive()),
        include_chart,
    )))
}

pub(crate) fn build_score_response(
    report: AssessmentReport,
    answered: usize,
    settings: AssessmentSettings,
    assessed_on: NaiveDate,
    include_chart: bool,
) -> ScoreResponse {
    let summary = report.summary();
    let (chart, gap_chart_svg) = if include_chart {
        (
            Some(report.chart_series()),
            Some(report.gap_chart().render_svg()),
        )
    } else {
        (None, None)
    };

    ScoreResponse {
        assessed_on,
        settings,
        answered,
        pillars: summary.pillars,
        overall_current: summary.overall_current,
        overall_desired: summary.overall_desired,
        overall_maturity: summary.overall_maturity,
        overall_maturity_label: summary.overall_maturity_label,
        focus: summary.focus,
        chart,
        gap_chart_svg,
    }
}

pub(crate) async fn gap_chart_endpoint(
    Extension(state): Extension<AssessmentState>,
) -> Result<impl IntoResponse, AppError> {
    let report = state.session.with_controller(|wizard| wizard.results())?;
    let svg = report.gap_chart().render_svg();
    let content_type = mime_guess::from_path(GAP_CHART_FILE).first_or_octet_stream();

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type.to_string())],
        svg,
    ))
}
