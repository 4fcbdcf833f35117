pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{categories, notes, tags};
use crate::state::AppState;

/// Build the `/v1/notes` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                 list, create, update (id in body)
/// /categories/{id}            get, delete
///
/// /tags/{categoryId}          tags under a category
/// /tag                        create, update (id in body)
/// /tag/{id}                   get, delete
///
/// /note                       create, update (id in body)
/// /note/{id}                  get, delete
/// /notes/{categoryId}         notes under every tag of a category
/// /notes/tag/{tagId}          notes under a tag
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(categories::list)
                .post(categories::create)
                .put(categories::update),
        )
        .route(
            "/categories/{id}",
            get(categories::get_by_id).delete(categories::delete),
        )
        .route("/tags/{category_id}", get(tags::list_by_category))
        .route("/tag", post(tags::create).put(tags::update))
        .route("/tag/{id}", get(tags::get_by_id).delete(tags::delete))
        .route("/note", post(notes::create).put(notes::update))
        .route("/note/{id}", get(notes::get_by_id).delete(notes::delete))
        .route("/notes/{category_id}", get(notes::list_by_category))
        .route("/notes/tag/{tag_id}", get(notes::list_by_tag))
}
