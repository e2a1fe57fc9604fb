use metrics_exporter_prometheus::PrometheusHandle;
use propdash::config::AppConfig;
use propdash::error::AppError;
use propdash::portfolio::{PortfolioService, RestBackend};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn portfolio_service(
    config: &AppConfig,
) -> Result<Arc<PortfolioService<RestBackend>>, AppError> {
    let backend = RestBackend::new(&config.backend)?;
    Ok(Arc::new(PortfolioService::new(
        Arc::new(backend),
        config.estimation,
    )))
}
