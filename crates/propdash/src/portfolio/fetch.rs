use super::collection::{normalize, Record};
use super::financials::EstimationPolicy;
use super::metrics::{MetricsSnapshot, PortfolioCollections};
use super::source::{PortfolioBackend, PortfolioSource};
use super::summary::{summarize_errors, SourceFailure};
use serde::Serialize;
use std::future::Future;
use tracing::{debug, warn};

/// Everything the dashboard needs from one refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotResult {
    pub properties: Vec<Record>,
    pub tenants: Vec<Record>,
    pub tasks: Vec<Record>,
    pub reminders: Vec<Record>,
    pub metrics: MetricsSnapshot,
    /// `"key: message"` for every failed source, in fetch order.
    pub errors: Vec<String>,
    pub failures: Vec<SourceFailure>,
    pub error_summary: String,
}

/// Drive four futures concurrently and wait for every one of them to finish.
///
/// Unlike `tokio::try_join!`, an early `Err` does not drop the remaining futures:
/// each slot of the result holds that future's own outcome.
pub async fn join_settled<T, E, A, B, C, D>(a: A, b: B, c: C, d: D) -> [Result<T, E>; 4]
where
    A: Future<Output = Result<T, E>>,
    B: Future<Output = Result<T, E>>,
    C: Future<Output = Result<T, E>>,
    D: Future<Output = Result<T, E>>,
{
    let (a, b, c, d) = tokio::join!(a, b, c, d);
    [a, b, c, d]
}

pub async fn fetch_snapshot<B>(backend: &B) -> SnapshotResult
where
    B: PortfolioBackend + ?Sized,
{
    fetch_snapshot_with(backend, &EstimationPolicy::default()).await
}

/// Fetch all four sources in parallel and aggregate whatever arrived.
///
/// Never fails: a source that errors is reported in `errors`/`error_summary` and
/// contributes an empty collection.
pub async fn fetch_snapshot_with<B>(backend: &B, policy: &EstimationPolicy) -> SnapshotResult
where
    B: PortfolioBackend + ?Sized,
{
    let [properties, tenants, tasks, reminders] = PortfolioSource::ordered();
    let outcomes = join_settled(
        backend.fetch_source(properties),
        backend.fetch_source(tenants),
        backend.fetch_source(tasks),
        backend.fetch_source(reminders),
    )
    .await;

    let mut slots: [Vec<Record>; 4] = Default::default();
    let mut failures = Vec::new();
    for ((source, outcome), slot) in PortfolioSource::ordered()
        .into_iter()
        .zip(outcomes)
        .zip(slots.iter_mut())
    {
        match outcome {
            Ok(payload) => *slot = normalize(&payload),
            Err(error) => {
                let message = clean_failure_message(&error.to_string());
                warn!(
                    source = %source,
                    url = error.url().unwrap_or("-"),
                    error = %message,
                    "portfolio source unavailable"
                );
                failures.push(SourceFailure::new(source.key(), message));
            }
        }
    }

    let [properties, tenants, tasks, reminders] = slots;
    let collections = PortfolioCollections {
        properties,
        tenants,
        tasks,
        reminders,
    };
    debug!(
        properties = collections.properties.len(),
        tenants = collections.tenants.len(),
        tasks = collections.tasks.len(),
        reminders = collections.reminders.len(),
        "portfolio snapshot collected"
    );

    let metrics = collections.metrics_with(policy);
    let errors = failures
        .iter()
        .map(|failure| format!("{}: {}", failure.key, failure.message))
        .collect();
    let error_summary = summarize_errors(&failures, &PortfolioSource::all_keys());
    let PortfolioCollections {
        properties,
        tenants,
        tasks,
        reminders,
    } = collections;

    SnapshotResult {
        properties,
        tenants,
        tasks,
        reminders,
        metrics,
        errors,
        failures,
        error_summary,
    }
}

/// Drop the `TypeError:` label some gateways put in front of fetch failures.
/// Other messages are kept verbatim.
pub fn clean_failure_message(message: &str) -> String {
    match message.strip_prefix("TypeError:") {
        Some(rest) => rest.trim().to_string(),
        None => message.to_string(),
    }
}
