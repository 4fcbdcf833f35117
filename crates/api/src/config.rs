use std::fmt;
use std::str::FromStr;

use notemaster_core::config::{env_or, env_parse, split_list, ConfigError};

/// Which [`NoteStore`](notemaster_core::store::NoteStore) backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// PostgreSQL through `notemaster-db`.
    #[default]
    Postgres,
    /// Process-local tables, lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected 'postgres' or 'memory', got '{other}'")),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => f.write_str("postgres"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. Database
/// settings are loaded separately with
/// [`DbConfig::from_env`](notemaster_db::DbConfig::from_env) when the
/// PostgreSQL backend is selected.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Storage backend (default: `postgres`).
    pub store_backend: StoreBackend,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORE_BACKEND`        | `postgres`                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_parse("PORT", 3000)?,
            cors_origins: split_list(&env_or("CORS_ORIGINS", "http://localhost:5000")),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", 30)?,
            store_backend: env_parse("STORE_BACKEND", StoreBackend::default())?,
        })
    }
}
