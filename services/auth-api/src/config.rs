//! Configuration for the Auth API service.

use std::time::Duration;

use streamgate_auth_core::AuthConfig;

/// Auth API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// Auth core configuration
    pub auth: AuthConfig,

    /// Metrics endpoint enabled
    pub metrics_enabled: bool,

    /// Per-request timeout for API routes
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8088".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Two independent signing secrets, both at least 32 bytes
        let access_secret =
            std::env::var("SECRET_KEY").map_err(|_| ConfigError::Missing("SECRET_KEY"))?;
        let refresh_secret = std::env::var("SECRET_REFRESH_KEY")
            .map_err(|_| ConfigError::Missing("SECRET_REFRESH_KEY"))?;

        // One coherent nominal lifetime pair: 24 h access, 7 d refresh
        let access_ttl_hours: u64 = std::env::var("ACCESS_TOKEN_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_TTL_HOURS"))?;

        let refresh_ttl_hours: u64 = std::env::var("REFRESH_TOKEN_TTL_HOURS")
            .unwrap_or_else(|_| "168".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REFRESH_TOKEN_TTL_HOURS"))?;

        let store_deadline_secs: u64 = std::env::var("STORE_DEADLINE_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("STORE_DEADLINE_SECS"))?;

        let metrics_enabled = std::env::var("METRICS_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;

        let auth = AuthConfig::try_new(access_secret, refresh_secret)
            .map_err(|e| ConfigError::AuthConfig(e.to_string()))?
            .with_access_ttl(Duration::from_secs(access_ttl_hours * 3600))
            .with_refresh_ttl(Duration::from_secs(refresh_ttl_hours * 3600))
            .with_store_deadline(Duration::from_secs(store_deadline_secs));

        Ok(Self {
            http_port,
            database_url,
            auth,
            metrics_enabled,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Auth config error: {0}")]
    AuthConfig(String),
}
