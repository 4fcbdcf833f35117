//! Integration tests for `/v1/notes/tag` and `/v1/notes/tags`.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, created_id, delete, get, post_json, put_json};
use serde_json::json;

async fn create_category(app: &Router, name: &str) -> String {
    let envelope =
        body_json(post_json(app.clone(), "/v1/notes/categories", json!({"name": name})).await)
            .await;
    created_id(&envelope)
}

#[tokio::test]
async fn create_tag_and_read_it_back() {
    let app = common::build_test_app();
    let category_id = create_category(&app, "Work").await;

    let response = post_json(
        app.clone(),
        "/v1/notes/tag",
        json!({"categoryId": category_id, "name": "meetings"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let tag_id = created_id(&body_json(response).await);

    let tag = body_json(get(app.clone(), &format!("/v1/notes/tag/{tag_id}")).await).await;
    assert_eq!(tag["name"], "meetings");
    assert_eq!(tag["categoryId"], category_id.as_str());
    assert_eq!(tag["category"], "Work");

    let tags = body_json(get(app, &format!("/v1/notes/tags/{category_id}")).await).await;
    assert_eq!(tags.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_tag_without_category_id_is_rejected() {
    let app = common::build_test_app();
    let response = post_json(app, "/v1/notes/tag", json!({"name": "loose"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope = body_json(response).await;
    assert_eq!(envelope["errors"][1], json!({"key": "categoryId", "value": "is required"}));
}

#[tokio::test]
async fn create_tag_under_unknown_category_is_conflict() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/v1/notes/tag",
        json!({"categoryId": uuid::Uuid::new_v4(), "name": "orphan"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["errors"][0]["key"], "Conflict");
}

#[tokio::test]
async fn update_tag_replaces_notes_when_supplied() {
    let app = common::build_test_app();
    let category_id = create_category(&app, "Work").await;
    let envelope = body_json(
        post_json(
            app.clone(),
            "/v1/notes/tag",
            json!({
                "categoryId": category_id,
                "name": "todo",
                "notes": [{"body": "one"}, {"body": "two"}]
            }),
        )
        .await,
    )
    .await;
    let tag_id = created_id(&envelope);

    let response = put_json(
        app.clone(),
        "/v1/notes/tag",
        json!({
            "id": tag_id,
            "categoryId": category_id,
            "name": "done",
            "notes": [{"body": "three"}]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    // tag row + two removed notes + one inserted note
    assert_eq!(body_json(response).await["affectedCount"], 4);

    let tag = body_json(get(app, &format!("/v1/notes/tag/{tag_id}")).await).await;
    assert_eq!(tag["name"], "done");
    let notes = tag["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["body"], "three");
}

#[tokio::test]
async fn delete_tag_removes_its_notes() {
    let app = common::build_test_app();
    let category_id = create_category(&app, "Work").await;
    let envelope = body_json(
        post_json(
            app.clone(),
            "/v1/notes/tag",
            json!({"categoryId": category_id, "name": "todo", "notes": [{"body": "x"}]}),
        )
        .await,
    )
    .await;
    let tag_id = created_id(&envelope);

    let response = delete(app.clone(), &format!("/v1/notes/tag/{tag_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["affectedCount"], 2);

    let response = get(app, &format!("/v1/notes/tag/{tag_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
