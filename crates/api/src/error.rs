use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use notemaster_core::error::CoreError;
use notemaster_core::models::FieldError;
use notemaster_core::result::OperationResult;

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as an [`OperationResult`] envelope so clients see
/// one error shape regardless of where the failure happened.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `notemaster_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body or path could not be turned into a valid command.
    #[error("Invalid request: {} field error(s)", .0.len())]
    ModelState(Vec<FieldError>),

    /// A failed envelope returned by the service layer.
    #[error("Operation failed: {}", .0.messages().join("; "))]
    Operation(OperationResult),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<OperationResult> for AppError {
    fn from(result: OperationResult) -> Self {
        AppError::Operation(result)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let envelope = match self {
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                OperationResult::error("An internal error occurred")
            }
            AppError::Core(core) => OperationResult::from_error(&core),
            AppError::ModelState(field_errors) => OperationResult::model_state_error(field_errors),
            AppError::Operation(result) => result,
        };

        (status_for(&envelope), Json(envelope)).into_response()
    }
}

/// HTTP status for an envelope. See [`OperationResult::status_hint`].
pub fn status_for(result: &OperationResult) -> StatusCode {
    StatusCode::from_u16(result.status_hint()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
