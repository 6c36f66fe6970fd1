use crate::cli::ServeArgs;
use crate::infra::{build_coordinator, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use contract_payout::config::AppConfig;
use contract_payout::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut config: AppConfig, mut args: ServeArgs) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    let coordinator = Arc::new(build_coordinator(&config.display));
    let defined_rules = coordinator.rules().rules().count();

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        coordinator: coordinator.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_service_routes(coordinator)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, defined_rules, "contract payout service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
