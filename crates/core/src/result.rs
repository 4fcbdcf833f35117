//! The operation-result envelope returned by every mutating operation.
//!
//! Serialized as camelCase JSON with absent fields omitted:
//!
//! ```json
//! { "isSuccess": false, "affectedCount": 0,
//!   "errors": [{ "key": "NotFound", "value": "Cannot locate ..." }] }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Error key for a missing entity.
pub const NOT_FOUND_KEY: &str = "NotFound";
/// Error key for generic failures.
pub const ERROR_KEY: &str = "Error";
/// Error key for rejected field values.
pub const VALIDATION_KEY: &str = "Validation";
/// Error key for key and reference violations.
pub const CONFLICT_KEY: &str = "Conflict";
/// Message attached under [`ERROR_KEY`] when request validation fails.
pub const MODEL_STATE_ERROR: &str = "ModelStateError";

/// One key/message pair in an envelope's error list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorItem {
    pub key: String,
    #[serde(rename = "value")]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    pub is_success: bool,
    pub affected_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_items: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorItem>>,
}

impl OperationResult {
    pub fn success(affected_count: u64) -> Self {
        Self {
            is_success: true,
            affected_count,
            info_items: None,
            errors: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::failure(NOT_FOUND_KEY, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::failure(ERROR_KEY, message)
    }

    /// Report a domain error under its own key (`NotFound`, `Validation`,
    /// `Conflict`, or `Error`).
    pub fn from_error(err: &CoreError) -> Self {
        Self::failure(err.key(), err.to_string())
    }

    /// Request validation failed. The first entry is always
    /// `Error: ModelStateError`, followed by one entry per invalid field.
    pub fn model_state_error<I>(field_errors: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut result = Self::failure(ERROR_KEY, MODEL_STATE_ERROR);
        if let Some(errors) = result.errors.as_mut() {
            errors.extend(
                field_errors
                    .into_iter()
                    .map(|(key, message)| ErrorItem { key, message }),
            );
        }
        result
    }

    fn failure(key: &str, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            affected_count: 0,
            info_items: None,
            errors: Some(vec![ErrorItem {
                key: key.to_string(),
                message: message.into(),
            }]),
        }
    }

    /// Attach an informational key/value pair.
    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.info_items
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn info(&self, key: &str) -> Option<&str> {
        self.info_items.as_ref()?.get(key).map(String::as_str)
    }

    pub fn errors(&self) -> &[ErrorItem] {
        self.errors.as_deref().unwrap_or_default()
    }

    pub fn has_error(&self, key: &str) -> bool {
        self.errors().iter().any(|e| e.key == key)
    }

    pub fn is_not_found(&self) -> bool {
        self.has_error(NOT_FOUND_KEY)
    }

    /// Messages of all errors, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.errors().iter().map(|e| e.message.as_str()).collect()
    }

    /// HTTP status code that best describes the envelope, chosen from its
    /// first error.
    ///
    /// - A successful envelope maps to 200.
    /// - `NotFound` maps to 404.
    /// - `Validation` and `Error: ModelStateError` map to 400.
    /// - `Conflict` maps to 409.
    /// - Everything else, including a failure with no errors, maps to 500.
    pub fn status_hint(&self) -> u16 {
        if self.is_success {
            return 200;
        }
        let Some(first) = self.errors().first() else {
            return 500;
        };
        match first.key.as_str() {
            NOT_FOUND_KEY => 404,
            VALIDATION_KEY => 400,
            CONFLICT_KEY => 409,
            ERROR_KEY if first.message == MODEL_STATE_ERROR => 400,
            _ => 500,
        }
    }
}
