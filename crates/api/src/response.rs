//! Success responses for mutating handlers.

use axum::http::StatusCode;
use axum::Json;
use notemaster_core::result::OperationResult;

use crate::error::{AppError, AppResult};

/// Return a successful envelope with `status`, or hand a failed one to
/// [`AppError`] so it picks the matching error status.
pub fn envelope(
    status: StatusCode,
    result: OperationResult,
) -> AppResult<(StatusCode, Json<OperationResult>)> {
    if result.is_success {
        Ok((status, Json(result)))
    } else {
        Err(AppError::Operation(result))
    }
}
