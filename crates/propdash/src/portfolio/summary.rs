use serde::Serialize;

pub const FULL_OUTAGE_MESSAGE: &str = "Live dashboard data is unavailable right now. Showing sample portfolio metrics until the connection is restored.";

const NETWORK_MARKERS: &[&str] = &["failed to fetch", "network", "cors"];

/// A source that could not be loaded, with its cleaned failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub key: String,
    pub message: String,
}

impl SourceFailure {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn is_network(&self) -> bool {
        let message = self.message.to_lowercase();
        NETWORK_MARKERS.iter().any(|marker| message.contains(marker))
    }
}

/// Render per-source failures as one status message for the dashboard.
///
/// Connectivity failures are grouped into a single "temporarily unavailable" sentence,
/// or replaced by [`FULL_OUTAGE_MESSAGE`] when every key in `all_keys` is affected.
/// Any other failure gets its own "Issue loading" sentence.
pub fn summarize_errors(failures: &[SourceFailure], all_keys: &[&str]) -> String {
    if failures.is_empty() {
        return String::new();
    }

    let mut network_keys: Vec<&str> = Vec::new();
    for failure in failures.iter().filter(|failure| failure.is_network()) {
        if !network_keys.contains(&failure.key.as_str()) {
            network_keys.push(failure.key.as_str());
        }
    }

    let full_outage = !all_keys.is_empty() && all_keys.iter().all(|key| network_keys.contains(key));
    if full_outage {
        return FULL_OUTAGE_MESSAGE.to_string();
    }

    let mut segments = Vec::new();
    if !network_keys.is_empty() {
        segments.push(format!(
            "Live data for {} is temporarily unavailable. Showing sample portfolio metrics for those sources.",
            join_with_and(&network_keys)
        ));
    }

    for failure in failures.iter().filter(|failure| !failure.is_network()) {
        let message = failure
            .message
            .strip_suffix('.')
            .unwrap_or(&failure.message);
        segments.push(format!("Issue loading {}: {}.", failure.key, message));
    }

    segments.join(" ").trim().to_string()
}

fn join_with_and(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KEYS: &[&str] = &["properties", "tenants", "tasks", "reminders"];

    #[test]
    fn no_failures_yield_empty_summary() {
        assert_eq!(summarize_errors(&[], ALL_KEYS), "");
    }

    #[test]
    fn partial_network_outage_names_affected_sources() {
        let failures = vec![
            SourceFailure::new("properties", "Failed to fetch"),
            SourceFailure::new("tenants", "Failed to fetch"),
        ];
        assert_eq!(
            summarize_errors(&failures, ALL_KEYS),
            "Live data for properties and tenants is temporarily unavailable. Showing sample portfolio metrics for those sources."
        );
    }

    #[test]
    fn three_sources_use_a_serial_comma() {
        let failures = vec![
            SourceFailure::new("properties", "NetworkError when attempting to fetch resource"),
            SourceFailure::new("tasks", "CORS request did not succeed"),
            SourceFailure::new("reminders", "failed to fetch"),
        ];
        assert!(summarize_errors(&failures, ALL_KEYS)
            .starts_with("Live data for properties, tasks, and reminders is temporarily unavailable."));
    }

    #[test]
    fn full_network_outage_collapses_to_one_notice() {
        let mut failures: Vec<SourceFailure> = ALL_KEYS
            .iter()
            .map(|key| SourceFailure::new(*key, "Failed to fetch"))
            .collect();
        assert_eq!(summarize_errors(&failures, ALL_KEYS), FULL_OUTAGE_MESSAGE);

        failures.push(SourceFailure::new("tasks", "Request failed with status 500"));
        assert_eq!(summarize_errors(&failures, ALL_KEYS), FULL_OUTAGE_MESSAGE);
    }

    #[test]
    fn specific_issues_are_listed_after_network_notice() {
        let failures = vec![
            SourceFailure::new("tasks", "Request failed with status 500."),
            SourceFailure::new("tenants", "Failed to fetch"),
        ];
        assert_eq!(
            summarize_errors(&failures, ALL_KEYS),
            "Live data for tenants is temporarily unavailable. Showing sample portfolio metrics for those sources. Issue loading tasks: Request failed with status 500."
        );
    }

    #[test]
    fn specific_issue_alone() {
        let failures = vec![SourceFailure::new("reminders", "Permission denied")];
        assert_eq!(
            summarize_errors(&failures, ALL_KEYS),
            "Issue loading reminders: Permission denied."
        );
    }
}
