//! Translation of sqlx errors into domain errors.

use notemaster_core::error::CoreError;

/// Map a sqlx error onto a [`CoreError`].
///
/// - Foreign key (`23503`) and unique (`23505`) violations become `Conflict`.
/// - Value too long (`22001`) and check violations (`23514`) become `Validation`.
/// - Everything else is logged and becomes `Internal`. That includes
///   `RowNotFound`: lookups use `fetch_optional`, so absence is `None`.
pub fn to_core_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or("unknown");
        match db_err.code().as_deref() {
            Some("23503") => {
                return CoreError::Conflict(format!(
                    "Referenced parent does not exist: {constraint}"
                ));
            }
            Some("23505") => {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
            Some("22001") | Some("23514") => {
                return CoreError::Validation(db_err.message().to_string());
            }
            _ => {}
        }
    }

    tracing::error!(error = %err, "Database error");
    CoreError::Internal(err.to_string())
}
