use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use innovation_assessment::assessment::{
    assessment_router, AssessmentMode, AssessmentSession, AssessmentSettings, WizardController,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(router: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&bytes).expect("json payload"))
}

#[tokio::test]
async fn single_state_survey_over_http() {
    let settings = AssessmentSettings {
        mode: AssessmentMode::SingleState,
        ..AssessmentSettings::default()
    };
    let session = Arc::new(AssessmentSession::new(WizardController::standard(settings)));
    let router = assessment_router(session);

    for (field, value) in [
        ("Organisation", "Acme"),
        ("Email", "not-an-email"),
        ("Experience%20Years", "3"),
        ("Number%20of%20Employees", "9"),
        ("Location", "Hull"),
    ] {
        let uri = format!("/api/v1/assessment/intake/{field}");
        let (status, _) = send(&router, "PUT", &uri, Some(json!({ "value": value }))).await;
        assert_eq!(status, StatusCode::OK, "{field}");
    }

    let (status, body) = send(&router, "POST", "/api/v1/assessment/intake/submit", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Please enter a valid email address.");

    let (status, _) = send(
        &router,
        "PUT",
        "/api/v1/assessment/intake/Email",
        Some(json!({ "value": "a@b.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&router, "POST", "/api/v1/assessment/intake/submit", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"]["phase"], "answering");
    assert_eq!(body["step_label"], "Strategy");

    let (status, _) = send(
        &router,
        "POST",
        "/api/v1/assessment/answers",
        Some(json!({ "pillar": "strategy", "question": 0, "tag": "desired", "value": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for pillar in ["strategy", "capacity", "discipline", "performance"] {
        for question in 0..6 {
            let (status, _) = send(
                &router,
                "POST",
                "/api/v1/assessment/answers",
                Some(json!({ "pillar": pillar, "question": question, "value": 7 })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, _) = send(&router, "POST", "/api/v1/assessment/next", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&router, "GET", "/api/v1/assessment/results", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overall_current"], 7.0);
    assert_eq!(body["overall_maturity"], "advanced");
    assert!(body.get("overall_desired").is_none());
    assert_eq!(body["focus"]["reason"], "lowest_current");
}
