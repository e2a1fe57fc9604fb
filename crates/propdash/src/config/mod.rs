use crate::portfolio::financials::{
    EstimationPolicy, DEFAULT_EXPENSES_PER_PROPERTY, DEFAULT_RENT_PER_PROPERTY,
    DEFAULT_RENT_PER_TENANT,
};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000/api";
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 10;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the dashboard service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub backend: BackendConfig,
    pub estimation: EstimationPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            backend: BackendConfig::from_env()?,
            estimation: estimation_from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the REST backend lives and how to talk to it.
#[derive(Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            env::var("APP_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        validate_backend_url(&base_url)?;

        let api_token = env::var("APP_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let timeout_secs = match env::var("APP_BACKEND_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout)?,
            Err(_) => DEFAULT_BACKEND_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn validate_backend_url(value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBackendUrl {
        value: value.to_string(),
        reason,
    };

    let url = reqwest::Url::parse(value).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

fn estimation_from_env() -> Result<EstimationPolicy, ConfigError> {
    Ok(EstimationPolicy {
        rent_per_tenant: estimate_var("APP_ESTIMATE_RENT_PER_TENANT", DEFAULT_RENT_PER_TENANT)?,
        rent_per_property: estimate_var(
            "APP_ESTIMATE_RENT_PER_PROPERTY",
            DEFAULT_RENT_PER_PROPERTY,
        )?,
        expenses_per_property: estimate_var(
            "APP_ESTIMATE_EXPENSES_PER_PROPERTY",
            DEFAULT_EXPENSES_PER_PROPERTY,
        )?,
    })
}

fn estimate_var(variable: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .ok_or(ConfigError::InvalidEstimate { variable }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidBackendUrl { value: String, reason: String },
    InvalidTimeout,
    InvalidEstimate { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidBackendUrl { value, reason } => write!(
                f,
                "APP_BACKEND_URL must be an absolute http(s) URL, got '{}' ({})",
                value, reason
            ),
            ConfigError::InvalidTimeout => {
                write!(f, "APP_BACKEND_TIMEOUT_SECS must be a positive integer")
            }
            ConfigError::InvalidEstimate { variable } => {
                write!(f, "{} must be a non-negative number", variable)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidBackendUrl { .. }
            | ConfigError::InvalidTimeout
            | ConfigError::InvalidEstimate { .. } => None,
        }
    }
}
