//! Page handlers and the site router.
//!
//! Reads render a template; form posts call the API and redirect back on
//! success. Any failure renders `error.html` with the envelope's messages.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use minijinja::{context, Value};
use notemaster_core::models::{CategoryModel, NoteModel, TagModel};
use notemaster_core::types::DbId;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::client::NoteApiClient;
use crate::error::{succeeded, WebError};
use crate::templates::TemplateEngine;

#[derive(Clone)]
pub struct WebState {
    pub api: NoteApiClient,
    pub templates: Arc<dyn TemplateEngine>,
}

impl WebState {
    fn page(&self, template: &str, context: Value) -> Result<Response, WebError> {
        let html = self.templates.render(template, context)?;
        Ok(Html(html).into_response())
    }

    /// Render a handler's result, replacing errors with the error page.
    fn respond(&self, result: Result<Response, WebError>) -> Response {
        let err = match result {
            Ok(response) => return response,
            Err(err) => err,
        };

        let status = err.status();
        if status.is_server_error() {
            tracing::error!(error = %err, "Page request failed");
        } else {
            tracing::info!(error = %err, "Page request rejected");
        }

        let context = context! { status => status.as_u16(), messages => err.messages() };
        match self.templates.render("error.html", context) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(render_err) => {
                tracing::error!(error = %render_err, "Failed to render error page");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NameForm {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct NoteForm {
    pub tag_id: DbId,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct NoteDeleteForm {
    pub category_id: DbId,
}

fn notes_page(category_id: DbId) -> String {
    format!("/categories/{category_id}/notes")
}

/// GET /
async fn index(State(state): State<WebState>) -> Response {
    state.respond(render_index(&state).await)
}

async fn render_index(state: &WebState) -> Result<Response, WebError> {
    let categories = state.api.get_categories().await?;
    state.page("categories.html", context! { categories })
}

/// GET /categories/{id}/notes
async fn category_notes(State(state): State<WebState>, Path(id): Path<DbId>) -> Response {
    state.respond(render_category_notes(&state, id).await)
}

async fn render_category_notes(state: &WebState, id: DbId) -> Result<Response, WebError> {
    let category = state.api.get_category(id).await?;
    let notes = state.api.get_notes_by_category(id).await?;
    state.page("notes.html", context! { category, notes })
}

/// POST /categories
async fn create_category(State(state): State<WebState>, Form(form): Form<NameForm>) -> Response {
    let model = CategoryModel {
        name: form.name.trim().to_string(),
        ..Default::default()
    };
    let result = succeeded(state.api.create_category(&model).await)
        .map(|_| Redirect::to("/").into_response());
    state.respond(result)
}

/// POST /categories/{id}/delete
async fn delete_category(State(state): State<WebState>, Path(id): Path<DbId>) -> Response {
    let result = succeeded(state.api.delete_category(id).await)
        .map(|_| Redirect::to("/").into_response());
    state.respond(result)
}

/// POST /categories/{id}/tags
async fn create_tag(
    State(state): State<WebState>,
    Path(category_id): Path<DbId>,
    Form(form): Form<NameForm>,
) -> Response {
    let model = TagModel {
        category_id: Some(category_id),
        name: form.name.trim().to_string(),
        ..Default::default()
    };
    let result = succeeded(state.api.create_tag(&model).await)
        .map(|_| Redirect::to(&notes_page(category_id)).into_response());
    state.respond(result)
}

/// POST /categories/{id}/notes
async fn create_note(
    State(state): State<WebState>,
    Path(category_id): Path<DbId>,
    Form(form): Form<NoteForm>,
) -> Response {
    let body = form.body.trim();
    let model = NoteModel {
        tag_id: Some(form.tag_id),
        body: (!body.is_empty()).then(|| body.to_string()),
        ..Default::default()
    };
    let result = succeeded(state.api.create_note(&model).await)
        .map(|_| Redirect::to(&notes_page(category_id)).into_response());
    state.respond(result)
}

/// POST /notes/{id}/delete
async fn delete_note(
    State(state): State<WebState>,
    Path(id): Path<DbId>,
    Form(form): Form<NoteDeleteForm>,
) -> Response {
    let result = succeeded(state.api.delete_note(id).await)
        .map(|_| Redirect::to(&notes_page(form.category_id)).into_response());
    state.respond(result)
}

pub fn build_site_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/categories", post(create_category))
        .route("/categories/{id}/notes", get(category_notes).post(create_note))
        .route("/categories/{id}/delete", post(delete_category))
        .route("/categories/{id}/tags", post(create_tag))
        .route("/notes/{id}/delete", post(delete_note))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
