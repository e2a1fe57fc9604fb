use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::fetch::SnapshotResult;
use super::financials::FormattedFinancials;
use super::metrics::{MetricsSnapshot, RawPortfolio};
use super::service::PortfolioService;
use super::source::PortfolioBackend;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEnvelope {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub snapshot: SnapshotResult,
}

#[derive(Debug, Serialize)]
pub struct MetricsEnvelope {
    #[serde(flatten)]
    pub metrics: MetricsSnapshot,
    pub formatted: FormattedFinancials,
}

/// Router builder exposing the live snapshot and ad-hoc metrics computation.
pub fn portfolio_router<B>(service: Arc<PortfolioService<B>>) -> Router
where
    B: PortfolioBackend + 'static,
{
    Router::new()
        .route("/api/v1/portfolio/snapshot", get(snapshot_handler::<B>))
        .route("/api/v1/portfolio/metrics", post(metrics_handler::<B>))
        .with_state(service)
}

pub(crate) async fn snapshot_handler<B>(
    State(service): State<Arc<PortfolioService<B>>>,
) -> Json<SnapshotEnvelope>
where
    B: PortfolioBackend + 'static,
{
    let snapshot = service.snapshot().await;
    Json(SnapshotEnvelope {
        generated_at: Utc::now(),
        snapshot,
    })
}

pub(crate) async fn metrics_handler<B>(
    State(service): State<Arc<PortfolioService<B>>>,
    Json(raw): Json<RawPortfolio>,
) -> Json<MetricsEnvelope>
where
    B: PortfolioBackend + 'static,
{
    let metrics = service.metrics(&raw);
    let formatted = metrics.financials.formatted();
    Json(MetricsEnvelope { metrics, formatted })
}
