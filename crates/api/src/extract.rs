//! Request extractors whose rejections use the model-state envelope.
//!
//! Axum's stock `Json` and `Path` rejections answer with plain text. These
//! wrappers turn the same failures into `400` responses carrying
//! `Error: ModelStateError` plus the offending field.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use notemaster_core::types::DbId;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A JSON request body.
#[derive(Debug, Clone)]
pub struct ModelJson<T>(pub T);

impl<S, T> FromRequest<S> for ModelJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                Err(AppError::ModelState(vec![(
                    "body".to_string(),
                    rejection.body_text(),
                )]))
            }
        }
    }
}

/// A single UUID path parameter.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub DbId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<DbId>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => Err(AppError::ModelState(vec![(
                "id".to_string(),
                rejection.body_text(),
            )])),
        }
    }
}
