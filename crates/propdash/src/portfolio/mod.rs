//! Portfolio metrics aggregation.
//!
//! Turns four independently fetched, loosely shaped collections into one dashboard
//! snapshot: counts, estimated financials, occupancy and an outage summary.

pub mod client;
pub mod collection;
pub mod fetch;
pub mod financials;
pub mod metrics;
pub mod numeric;
pub mod occupancy;
mod router;
mod service;
pub mod source;
pub mod summary;

pub use client::RestBackend;
pub use collection::{normalize, Record};
pub use fetch::{fetch_snapshot, fetch_snapshot_with, join_settled, SnapshotResult};
pub use financials::{
    derive_financials, derive_financials_with, EstimationPolicy, Financials, FormattedFinancials,
};
pub use metrics::{
    compute_metrics, compute_metrics_with, create_empty_metrics, format_currency, MetricsMemo,
    MetricsSnapshot, PortfolioCollections, RawPortfolio,
};
pub use numeric::{coerce_number, first_numeric};
pub use occupancy::{classify_property, derive_occupancy, Occupancy, OccupancyClass};
pub use router::{portfolio_router, MetricsEnvelope, SnapshotEnvelope};
pub use service::PortfolioService;
pub use source::{FetchError, PortfolioBackend, PortfolioSource};
pub use summary::{summarize_errors, SourceFailure, FULL_OUTAGE_MESSAGE};
