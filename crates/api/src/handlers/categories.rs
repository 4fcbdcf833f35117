//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use notemaster_core::models::CategoryModel;
use notemaster_core::result::OperationResult;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, ModelJson};
use crate::response::envelope;
use crate::state::AppState;

/// GET /v1/notes/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryModel>>> {
    let categories = state.notes.get_categories().await?;
    Ok(Json(categories.iter().map(CategoryModel::from).collect()))
}

/// POST /v1/notes/categories
pub async fn create(
    State(state): State<AppState>,
    ModelJson(model): ModelJson<CategoryModel>,
) -> AppResult<(StatusCode, Json<OperationResult>)> {
    let command = model.into_create_command().map_err(AppError::ModelState)?;
    envelope(StatusCode::CREATED, state.notes.create_category(command).await)
}

/// PUT /v1/notes/categories
pub async fn update(
    State(state): State<AppState>,
    ModelJson(model): ModelJson<CategoryModel>,
) -> AppResult<(StatusCode, Json<OperationResult>)> {
    let command = model.into_update_command().map_err(AppError::ModelState)?;
    envelope(StatusCode::OK, state.notes.update_category(command).await)
}

/// GET /v1/notes/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<CategoryModel>> {
    let category = state.notes.get_category_by_id(id).await?;
    Ok(Json(CategoryModel::from(&category)))
}

/// DELETE /v1/notes/categories/{id}
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<(StatusCode, Json<OperationResult>)> {
    envelope(StatusCode::OK, state.notes.delete_category(id).await)
}
