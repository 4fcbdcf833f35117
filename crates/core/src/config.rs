//! Environment-variable helpers shared by the API and web binaries.

use std::str::FromStr;

/// A configuration value could not be read or parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be set")]
    Missing { key: &'static str },

    #[error("{key} has an invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Read `key` from the environment, falling back to `default` when unset.
pub fn env_or(key: &'static str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a required variable.
pub fn env_required(key: &'static str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::Missing { key })
}

/// Read and parse `key`, falling back to `default` when unset.
pub fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

/// Parse a raw string into `T`, reporting failures against `key`.
pub fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Split a comma-separated list, dropping empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
