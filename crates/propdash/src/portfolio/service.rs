use std::sync::Arc;

use super::fetch::{fetch_snapshot_with, SnapshotResult};
use super::financials::EstimationPolicy;
use super::metrics::{compute_metrics_with, MetricsSnapshot, RawPortfolio};
use super::source::PortfolioBackend;

/// Service pairing a data backend with the estimation policy used for its snapshots.
pub struct PortfolioService<B> {
    backend: Arc<B>,
    policy: EstimationPolicy,
}

impl<B> PortfolioService<B>
where
    B: PortfolioBackend + 'static,
{
    pub fn new(backend: Arc<B>, policy: EstimationPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn policy(&self) -> &EstimationPolicy {
        &self.policy
    }

    pub async fn snapshot(&self) -> SnapshotResult {
        fetch_snapshot_with(self.backend.as_ref(), &self.policy).await
    }

    pub fn metrics(&self, raw: &RawPortfolio) -> MetricsSnapshot {
        compute_metrics_with(raw, &self.policy)
    }
}
