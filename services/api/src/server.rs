use crate::cli::ServeArgs;
use crate::infra::{AppState, AssessmentState};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use innovation_assessment::assessment::{AssessmentSession, WizardController};
use innovation_assessment::config::AppConfig;
use innovation_assessment::error::AppError;
use innovation_assessment::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let session = Arc::new(AssessmentSession::new(WizardController::standard(
        config.assessment,
    )));
    let assessment_state = AssessmentState {
        session: session.clone(),
        settings: config.assessment,
    };

    let app = with_assessment_routes(session)
        .layer(Extension(app_state))
        .layer(Extension(assessment_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        scale = config.assessment.scale.label(),
        mode = config.assessment.mode.label(),
        "innovation assessment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
