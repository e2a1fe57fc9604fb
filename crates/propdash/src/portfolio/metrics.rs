use super::collection::{normalize, Record};
use super::financials::{derive_financials_with, EstimationPolicy, Financials};
use super::occupancy::{derive_occupancy, Occupancy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The four source payloads exactly as the backend returned them.
///
/// Missing members deserialize as `null`, which normalizes to an empty collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPortfolio {
    #[serde(default)]
    pub properties: Value,
    #[serde(default)]
    pub tenants: Value,
    #[serde(default)]
    pub tasks: Value,
    #[serde(default)]
    pub reminders: Value,
}

/// Normalized source collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioCollections {
    pub properties: Vec<Record>,
    pub tenants: Vec<Record>,
    pub tasks: Vec<Record>,
    pub reminders: Vec<Record>,
}

impl PortfolioCollections {
    pub fn from_raw(raw: &RawPortfolio) -> Self {
        Self {
            properties: normalize(&raw.properties),
            tenants: normalize(&raw.tenants),
            tasks: normalize(&raw.tasks),
            reminders: normalize(&raw.reminders),
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics_with(&EstimationPolicy::default())
    }

    pub fn metrics_with(&self, policy: &EstimationPolicy) -> MetricsSnapshot {
        MetricsSnapshot {
            property_count: self.properties.len(),
            tenant_count: self.tenants.len(),
            task_count: self.tasks.len(),
            reminder_count: self.reminders.len(),
            financials: derive_financials_with(&self.properties, &self.tenants, policy),
            occupancy: derive_occupancy(&self.properties, &self.tenants),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub property_count: usize,
    pub tenant_count: usize,
    pub task_count: usize,
    pub reminder_count: usize,
    pub financials: Financials,
    pub occupancy: Occupancy,
}

/// Zeroed snapshot. Every call builds a new, independently owned value.
pub fn create_empty_metrics() -> MetricsSnapshot {
    MetricsSnapshot::default()
}

pub fn compute_metrics(raw: &RawPortfolio) -> MetricsSnapshot {
    PortfolioCollections::from_raw(raw).metrics()
}

pub fn compute_metrics_with(raw: &RawPortfolio, policy: &EstimationPolicy) -> MetricsSnapshot {
    PortfolioCollections::from_raw(raw).metrics_with(policy)
}

/// View-layer helper that recomputes metrics only when the caller-supplied key changes.
///
/// The key is the caller's notion of "inputs changed" (a fetch generation, a version
/// counter); the memo never inspects the collections to decide.
#[derive(Debug, Clone)]
pub struct MetricsMemo<K> {
    cached: Option<(K, MetricsSnapshot)>,
}

impl<K: PartialEq> MetricsMemo<K> {
    pub fn new() -> Self {
        Self { cached: None }
    }

    pub fn get(&mut self, key: K, collections: &PortfolioCollections) -> &MetricsSnapshot {
        let stale = !matches!(&self.cached, Some((cached_key, _)) if *cached_key == key);
        if stale {
            self.cached = None;
        }
        let (_, snapshot) = self
            .cached
            .get_or_insert_with(|| (key, collections.metrics()));
        snapshot
    }
}

impl<K: PartialEq> Default for MetricsMemo<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole-dollar USD rendering, e.g. `$1,235` or `-$987`.
///
/// Rounds half away from zero. Non-finite amounts render as `$0`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }

    let digits = format!("{:.0}", amount.abs().round());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if amount < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
