//! Fixed-delay retry for transient database failures.
//!
//! Connection drops, pool timeouts, serialization failures and deadlocks are
//! retried up to [`RetryPolicy::max_attempts`] times with a constant delay.
//! Everything else fails on the first attempt.

use std::future::Future;
use std::time::Duration;

/// SQLSTATE codes worth retrying besides the `08xxx` connection class.
const TRANSIENT_SQLSTATES: &[&str] = &[
    "40001", // serialization_failure
    "40P01", // deadlock_detected
    "53300", // too_many_connections
    "57P01", // admin_shutdown
    "57P03", // cannot_connect_now
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Run `attempt` until it succeeds, fails permanently, or runs out of
    /// attempts. Each retry is logged at `warn`.
    pub async fn run<T, F, Fut>(&self, operation: &'static str, mut attempt: F) -> Result<T, sqlx::Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        let mut tries = 1u32;
        loop {
            match attempt().await {
                Err(err) if tries < self.max_attempts && is_transient(&err) => {
                    tracing::warn!(
                        operation,
                        attempt = tries,
                        delay_ms = self.delay.as_millis() as u64,
                        error = %err,
                        "Transient database failure, retrying",
                    );
                    tokio::time::sleep(self.delay).await;
                    tries += 1;
                }
                result => return result,
            }
        }
    }
}

/// Whether an error is worth retrying.
pub fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.starts_with("08") || TRANSIENT_SQLSTATES.contains(&code.as_ref())),
        _ => false,
    }
}
