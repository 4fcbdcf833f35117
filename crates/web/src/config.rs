use std::time::Duration;

use notemaster_core::config::{env_or, env_parse, ConfigError};

/// Where and how the site reaches the REST API.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// API root, e.g. `http://localhost:3000`.
    pub base_url: String,
    /// Per-request timeout covering connect, send and body read.
    pub timeout: Duration,
}

/// Web front-end configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    pub api: ApiClientConfig,
}

impl WebConfig {
    /// | Env Var            | Default                 |
    /// |--------------------|-------------------------|
    /// | `WEB_HOST`         | `0.0.0.0`               |
    /// | `WEB_PORT`         | `5000`                  |
    /// | `API_ENDPOINT`     | `http://localhost:3000` |
    /// | `API_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or("WEB_HOST", "0.0.0.0"),
            port: env_parse("WEB_PORT", 5000)?,
            api: ApiClientConfig {
                base_url: env_or("API_ENDPOINT", "http://localhost:3000"),
                timeout: Duration::from_secs(env_parse("API_TIMEOUT_SECS", 30)?),
            },
        })
    }
}
