use contract_payout::config::DisplayConfig;
use contract_payout::payout::{PayoutCoordinator, RuleTable};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) coordinator: Arc<PayoutCoordinator>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_coordinator(display: &DisplayConfig) -> PayoutCoordinator {
    PayoutCoordinator::new(RuleTable::standard(), display.clone())
}
