//! Handlers for the `/note` and `/notes` resources.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use notemaster_core::models::NoteModel;
use notemaster_core::result::OperationResult;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, ModelJson};
use crate::response::envelope;
use crate::state::AppState;

/// POST /v1/notes/note
pub async fn create(
    State(state): State<AppState>,
    ModelJson(model): ModelJson<NoteModel>,
) -> AppResult<(StatusCode, Json<OperationResult>)> {
    let command = model.into_create_command().map_err(AppError::ModelState)?;
    envelope(StatusCode::CREATED, state.notes.create_note(command).await)
}

/// PUT /v1/notes/note
pub async fn update(
    State(state): State<AppState>,
    ModelJson(model): ModelJson<NoteModel>,
) -> AppResult<(StatusCode, Json<OperationResult>)> {
    let command = model.into_update_command().map_err(AppError::ModelState)?;
    envelope(StatusCode::OK, state.notes.update_note(command).await)
}

/// GET /v1/notes/note/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<NoteModel>> {
    let note = state.notes.get_note_by_id(id).await?;
    Ok(Json(NoteModel::from(&note)))
}

/// DELETE /v1/notes/note/{id}
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<(StatusCode, Json<OperationResult>)> {
    envelope(StatusCode::OK, state.notes.delete_note(id).await)
}

/// GET /v1/notes/notes/{categoryId}
pub async fn list_by_category(
    State(state): State<AppState>,
    IdPath(category_id): IdPath,
) -> AppResult<Json<Vec<NoteModel>>> {
    let notes = state.notes.get_notes_by_category(category_id).await?;
    Ok(Json(notes.iter().map(NoteModel::from).collect()))
}

/// GET /v1/notes/notes/tag/{tagId}
pub async fn list_by_tag(
    State(state): State<AppState>,
    IdPath(tag_id): IdPath,
) -> AppResult<Json<Vec<NoteModel>>> {
    let notes = state.notes.get_notes_by_tag(tag_id).await?;
    Ok(Json(notes.iter().map(NoteModel::from).collect()))
}
