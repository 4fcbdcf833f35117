//! Handlers for the `/tag` and `/tags` resources.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use notemaster_core::models::TagModel;
use notemaster_core::result::OperationResult;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, ModelJson};
use crate::response::envelope;
use crate::state::AppState;

/// GET /v1/notes/tags/{categoryId}
pub async fn list_by_category(
    State(state): State<AppState>,
    IdPath(category_id): IdPath,
) -> AppResult<Json<Vec<TagModel>>> {
    let tags = state.notes.get_tags_by_category(category_id).await?;
    Ok(Json(tags.iter().map(TagModel::from).collect()))
}

/// POST /v1/notes/tag
pub async fn create(
    State(state): State<AppState>,
    ModelJson(model): ModelJson<TagModel>,
) -> AppResult<(StatusCode, Json<OperationResult>)> {
    let command = model.into_create_command().map_err(AppError::ModelState)?;
    envelope(StatusCode::CREATED, state.notes.create_tag(command).await)
}

/// PUT /v1/notes/tag
pub async fn update(
    State(state): State<AppState>,
    ModelJson(model): ModelJson<TagModel>,
) -> AppResult<(StatusCode, Json<OperationResult>)> {
    let command = model.into_update_command().map_err(AppError::ModelState)?;
    envelope(StatusCode::OK, state.notes.update_tag(command).await)
}

/// GET /v1/notes/tag/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<TagModel>> {
    let tag = state.notes.get_tag_by_id(id).await?;
    Ok(Json(TagModel::from(&tag)))
}

/// DELETE /v1/notes/tag/{id}
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<(StatusCode, Json<OperationResult>)> {
    envelope(StatusCode::OK, state.notes.delete_tag(id).await)
}
