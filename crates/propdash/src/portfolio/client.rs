//! REST client for the property management backend.
//!
//! Each source lives at `{base_url}/{source}/` and answers with a JSON collection in
//! any of the shapes the normalizer understands.

use super::source::{FetchError, PortfolioBackend, PortfolioSource};
use crate::config::BackendConfig;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;

pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl RestBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    pub fn source_url(&self, source: PortfolioSource) -> String {
        format!("{}/{}/", self.base_url, source.key())
    }
}

impl std::fmt::Debug for RestBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestBackend")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.api_token.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PortfolioBackend for RestBackend {
    async fn fetch_source(&self, source: PortfolioSource) -> Result<Value, FetchError> {
        let url = self.source_url(source);
        let mut request = self.client.get(&url).header(ACCEPT, "application/json");
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| FetchError::Network {
            url: url.clone(),
            detail: err.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|err| {
            if err.is_decode() {
                FetchError::Decode {
                    url,
                    detail: err.without_url().to_string(),
                }
            } else {
                FetchError::Network {
                    url,
                    detail: err.to_string(),
                }
            }
        })
    }
}
