use crate::cli::ServeArgs;
use crate::infra::{open_workflow, AppState};
use crate::routes::with_screening_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tenant_screening::config::AppConfig;
use tenant_screening::error::AppError;
use tenant_screening::telemetry;
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let workflow = open_workflow(&config.screening)?;
    info!(
        store = %workflow.store().describe(),
        applications = workflow.applications().len(),
        income_multiplier = workflow.income_multiplier(),
        "screening workflow loaded"
    );
    let workflow = Arc::new(Mutex::new(workflow));

    let app = with_screening_routes(workflow)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "tenant screening service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
