use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Pillar, RatingTag};
use super::session::AssessmentSession;
use super::snapshot::WizardSnapshot;
use super::wizard::{WizardController, WizardError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldUpdate {
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub pillar: Pillar,
    pub question: usize,
    #[serde(default = "current_tag")]
    pub tag: RatingTag,
    pub value: i64,
}

fn current_tag() -> RatingTag {
    RatingTag::Current
}

/// Router builder exposing the wizard actions over JSON.
pub fn assessment_router(session: Arc<AssessmentSession>) -> Router {
    Router::new()
        .route("/api/v1/assessment", get(snapshot_handler))
        .route("/api/v1/assessment/questions", get(questions_handler))
        .route("/api/v1/assessment/intake/submit", post(submit_intake_handler))
        .route("/api/v1/assessment/intake/:field", put(update_field_handler))
        .route("/api/v1/assessment/answers", post(answer_handler))
        .route("/api/v1/assessment/next", post(next_pillar_handler))
        .route("/api/v1/assessment/previous", post(previous_pillar_handler))
        .route(
            "/api/v1/assessment/results",
            post(view_results_handler).get(results_handler),
        )
        .route("/api/v1/assessment/restart", post(restart_handler))
        .with_state(session)
}

pub(crate) async fn snapshot_handler(State(session): State<Arc<AssessmentSession>>) -> Response {
    (StatusCode::OK, axum::Json(session.snapshot())).into_response()
}

pub(crate) async fn questions_handler(State(session): State<Arc<AssessmentSession>>) -> Response {
    let payload = session.with_controller(|wizard| {
        json!({
            "mode": wizard.settings().mode,
            "scale": wizard.responses().scale(),
            "sections": wizard.question_bank().sections(),
        })
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn update_field_handler(
    State(session): State<Arc<AssessmentSession>>,
    Path(field): Path<String>,
    axum::Json(update): axum::Json<FieldUpdate>,
) -> Response {
    apply(&session, |wizard| wizard.update_field(&field, update.value))
}

pub(crate) async fn submit_intake_handler(
    State(session): State<Arc<AssessmentSession>>,
) -> Response {
    apply(&session, |wizard| wizard.submit_intake().map(|_| ()))
}

pub(crate) async fn answer_handler(
    State(session): State<Arc<AssessmentSession>>,
    axum::Json(answer): axum::Json<AnswerSubmission>,
) -> Response {
    apply(&session, |wizard| {
        wizard.answer(answer.pillar, answer.question, answer.tag, answer.value)
    })
}

pub(crate) async fn next_pillar_handler(
    State(session): State<Arc<AssessmentSession>>,
) -> Response {
    apply(&session, |wizard| wizard.next_pillar().map(|_| ()))
}

pub(crate) async fn previous_pillar_handler(
    State(session): State<Arc<AssessmentSession>>,
) -> Response {
    apply(&session, |wizard| wizard.previous_pillar().map(|_| ()))
}

pub(crate) async fn view_results_handler(
    State(session): State<Arc<AssessmentSession>>,
) -> Response {
    apply(&session, |wizard| wizard.view_results().map(|_| ()))
}

pub(crate) async fn results_handler(State(session): State<Arc<AssessmentSession>>) -> Response {
    let outcome = session.with_controller(|wizard| {
        wizard
            .results()
            .map(|report| report.summary())
            .map_err(|error| (error, wizard.snapshot()))
    });

    match outcome {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err((error, snapshot)) => error_response(&error, snapshot),
    }
}

pub(crate) async fn restart_handler(State(session): State<Arc<AssessmentSession>>) -> Response {
    apply(&session, |wizard| {
        wizard.restart();
        Ok(())
    })
}

fn apply(
    session: &AssessmentSession,
    action: impl FnOnce(&mut WizardController) -> Result<(), WizardError>,
) -> Response {
    let (outcome, snapshot) = session.with_controller(|wizard| {
        let outcome = action(wizard);
        (outcome, wizard.snapshot())
    });

    match outcome {
        Ok(()) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => error_response(&error, snapshot),
    }
}

fn error_response(error: &WizardError, snapshot: WizardSnapshot) -> Response {
    let payload = json!({
        "error": error.to_string(),
        "snapshot": snapshot,
    });
    (status_for(error), axum::Json(payload)).into_response()
}

pub fn status_for(error: &WizardError) -> StatusCode {
    match error {
        WizardError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        WizardError::InvalidRating(_) | WizardError::TagNotTracked { .. } => {
            StatusCode::BAD_REQUEST
        }
        WizardError::UnknownField(_) | WizardError::UnknownQuestion { .. } => {
            StatusCode::NOT_FOUND
        }
        WizardError::WrongPhase { .. }
        | WizardError::NotOnFinalPillar
        | WizardError::BackNavigationDisabled => StatusCode::CONFLICT,
    }
}

