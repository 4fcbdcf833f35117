use axum::http::StatusCode;
use notemaster_core::result::{OperationResult, ERROR_KEY, MODEL_STATE_ERROR, NOT_FOUND_KEY};

/// Failure while building a page.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// The API reported a failed envelope (or the client synthesized one).
    #[error("API call failed: {}", .0.messages().join("; "))]
    Api(OperationResult),

    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl From<OperationResult> for WebError {
    fn from(result: OperationResult) -> Self {
        WebError::Api(result)
    }
}

impl WebError {
    /// Status for the error page, taken from the envelope.
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::Api(result) => StatusCode::from_u16(result.status_hint())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            WebError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Lines to show the user.
    pub fn messages(&self) -> Vec<String> {
        match self {
            WebError::Api(result) => result
                .errors()
                .iter()
                .filter(|e| e.message != MODEL_STATE_ERROR)
                .map(|e| {
                    if e.key == ERROR_KEY || e.key == NOT_FOUND_KEY {
                        e.message.clone()
                    } else {
                        format!("{}: {}", e.key, e.message)
                    }
                })
                .collect(),
            WebError::Render(_) => vec!["The page could not be rendered".to_string()],
        }
    }
}

/// Turn a mutation envelope into `Ok` only when it succeeded.
pub fn succeeded(result: OperationResult) -> Result<OperationResult, WebError> {
    if result.is_success {
        Ok(result)
    } else {
        Err(WebError::Api(result))
    }
}
