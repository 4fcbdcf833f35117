use crate::result::{CONFLICT_KEY, ERROR_KEY, NOT_FOUND_KEY, VALIDATION_KEY};
use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Key under which this error is reported in an
    /// [`OperationResult`](crate::result::OperationResult) error list.
    pub fn key(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } => NOT_FOUND_KEY,
            CoreError::Validation(_) => VALIDATION_KEY,
            CoreError::Conflict(_) => CONFLICT_KEY,
            CoreError::Internal(_) => ERROR_KEY,
        }
    }
}
