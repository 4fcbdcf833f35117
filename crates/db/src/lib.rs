//! PostgreSQL persistence for NoteMaster.
//!
//! Provides pool construction, embedded migrations, row models, the
//! repositories that issue SQL, and [`PgNoteStore`], the
//! [`NoteStore`](notemaster_core::store::NoteStore) backed by them.

use std::str::FromStr;
use std::time::Duration;

use notemaster_core::config::{env_parse, env_required, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod errors;
pub mod models;
pub mod repositories;
pub mod retry;
pub mod store;

pub use retry::RetryPolicy;
pub use store::PgNoteStore;

pub type DbPool = sqlx::PgPool;

/// Connection settings for the note database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    /// Pool size (default: `20`).
    pub max_connections: u32,
    /// Server-side `statement_timeout`, also used as the pool acquire timeout
    /// (default: `30`).
    pub command_timeout_secs: u64,
    /// Transient-failure retry policy (default: 3 attempts, 3 s apart).
    pub retry: RetryPolicy,
}

impl DbConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            command_timeout_secs: 30,
            retry: RetryPolicy::default(),
        }
    }

    /// Load from `DATABASE_URL`, `DB_MAX_CONNECTIONS`,
    /// `DB_COMMAND_TIMEOUT_SECS`, `DB_RETRY_ATTEMPTS` and
    /// `DB_RETRY_DELAY_SECS`. Only the URL is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::new(env_required("DATABASE_URL")?);
        let retry_delay = env_parse("DB_RETRY_DELAY_SECS", defaults.retry.delay.as_secs())?;

        Ok(Self {
            max_connections: env_parse("DB_MAX_CONNECTIONS", defaults.max_connections)?,
            command_timeout_secs: env_parse(
                "DB_COMMAND_TIMEOUT_SECS",
                defaults.command_timeout_secs,
            )?,
            retry: RetryPolicy {
                max_attempts: env_parse("DB_RETRY_ATTEMPTS", defaults.retry.max_attempts)?.max(1),
                delay: Duration::from_secs(retry_delay),
            },
            ..defaults
        })
    }
}

/// Create a connection pool from the given configuration.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let timeout_ms = config.command_timeout_secs.saturating_mul(1000);
    let options = PgConnectOptions::from_str(&config.url)?
        .options([("statement_timeout", timeout_ms.to_string())]);

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.command_timeout_secs))
        .connect_with(options)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
