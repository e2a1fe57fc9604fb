use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// One of the four independently fetched collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PortfolioSource {
    Properties,
    Tenants,
    Tasks,
    Reminders,
}

impl PortfolioSource {
    pub const fn ordered() -> [PortfolioSource; 4] {
        [
            PortfolioSource::Properties,
            PortfolioSource::Tenants,
            PortfolioSource::Tasks,
            PortfolioSource::Reminders,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Properties => "properties",
            Self::Tenants => "tenants",
            Self::Tasks => "tasks",
            Self::Reminders => "reminders",
        }
    }

    pub fn all_keys() -> Vec<&'static str> {
        Self::ordered().into_iter().map(Self::key).collect()
    }
}

impl fmt::Display for PortfolioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to fetch {url}: {detail}")]
    Network { url: String, detail: String },
    #[error("Request failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("Invalid response body: {detail}")]
    Decode { url: String, detail: String },
    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Endpoint the failure came from, when the backend knows it.
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::Network { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => Some(url),
            FetchError::Other(_) => None,
        }
    }
}

/// Remote data access for the portfolio dashboard.
///
/// Implementations return the raw payload untouched; shape handling belongs to the
/// aggregation layer.
#[async_trait]
pub trait PortfolioBackend: Send + Sync {
    async fn fetch_source(&self, source: PortfolioSource) -> Result<Value, FetchError>;
}
