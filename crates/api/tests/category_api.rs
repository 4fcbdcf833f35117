//! Integration tests for `/v1/notes/categories`.

mod common;

use axum::http::StatusCode;
use common::{body_json, created_id, delete, get, post_json, put_json};
use serde_json::json;

#[tokio::test]
async fn create_then_get_category() {
    let app = common::build_test_app();

    let response = post_json(app.clone(), "/v1/notes/categories", json!({"name": "Work"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let envelope = body_json(response).await;
    assert_eq!(envelope["isSuccess"], true);
    assert_eq!(envelope["affectedCount"], 1);
    assert!(envelope.get("errors").is_none());

    let id = created_id(&envelope);
    let response = get(app, &format!("/v1/notes/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let category = body_json(response).await;
    assert_eq!(category["id"], id.as_str());
    assert_eq!(category["name"], "Work");
    assert_eq!(category["tags"], json!([]));
}

#[tokio::test]
async fn create_category_with_nested_tags_and_notes() {
    let app = common::build_test_app();
    let body = json!({
        "name": "Home",
        "tags": [
            {"name": "garden", "notes": [{"body": "plant tulips"}, {"body": "mow"}]},
            {"name": "kitchen", "notes": [{"body": "fix tap"}]}
        ]
    });

    let response = post_json(app.clone(), "/v1/notes/categories", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let envelope = body_json(response).await;
    assert_eq!(envelope["affectedCount"], 6);

    let id = created_id(&envelope);
    let category = body_json(get(app, &format!("/v1/notes/categories/{id}")).await).await;
    let tags = category["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0]["name"], "garden");
    assert_eq!(tags[0]["categoryId"], id.as_str());
    assert_eq!(tags[0]["notes"].as_array().unwrap().len(), 2);
    assert_eq!(tags[1]["notes"][0]["body"], "fix tap");
}

#[tokio::test]
async fn list_categories_is_sorted_by_name() {
    let app = common::build_test_app();
    for name in ["Work", "Archive", "Personal"] {
        post_json(app.clone(), "/v1/notes/categories", json!({"name": name})).await;
    }

    let list = body_json(get(app, "/v1/notes/categories").await).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Archive", "Personal", "Work"]);
}

#[tokio::test]
async fn update_category_renames_it() {
    let app = common::build_test_app();
    let envelope =
        body_json(post_json(app.clone(), "/v1/notes/categories", json!({"name": "Wrok"})).await)
            .await;
    let id = created_id(&envelope);

    let response = put_json(
        app.clone(),
        "/v1/notes/categories",
        json!({"id": id, "name": "Work"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["isSuccess"], true);

    let category = body_json(get(app, &format!("/v1/notes/categories/{id}")).await).await;
    assert_eq!(category["name"], "Work");
}

#[tokio::test]
async fn update_unknown_category_returns_not_found_envelope() {
    let app = common::build_test_app();
    let id = uuid::Uuid::new_v4();

    let response = put_json(
        app,
        "/v1/notes/categories",
        json!({"id": id, "name": "Ghost"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let envelope = body_json(response).await;
    assert_eq!(envelope["isSuccess"], false);
    assert_eq!(envelope["affectedCount"], 0);
    assert_eq!(envelope["errors"][0]["key"], "NotFound");
    assert_eq!(
        envelope["errors"][0]["value"],
        format!("Cannot locate existing category for ID: '{id}'")
    );
}

#[tokio::test]
async fn update_without_id_is_model_state_error() {
    let app = common::build_test_app();
    let response = put_json(app, "/v1/notes/categories", json!({"name": "Work"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let envelope = body_json(response).await;
    assert_eq!(envelope["errors"][0], json!({"key": "Error", "value": "ModelStateError"}));
    assert_eq!(envelope["errors"][1]["key"], "id");
}

#[tokio::test]
async fn get_unknown_category_returns_404() {
    let app = common::build_test_app();
    let id = uuid::Uuid::new_v4();
    let response = get(app, &format!("/v1/notes/categories/{id}")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["errors"][0]["key"], "NotFound");
}

#[tokio::test]
async fn delete_category_cascades_to_tags_and_notes() {
    let app = common::build_test_app();
    let body = json!({
        "name": "Work",
        "tags": [{"name": "meetings", "notes": [{"body": "agenda"}, {"body": "minutes"}]}]
    });
    let envelope = body_json(post_json(app.clone(), "/v1/notes/categories", body).await).await;
    let id = created_id(&envelope);

    let response = delete(app.clone(), &format!("/v1/notes/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["affectedCount"], 4);

    let list = body_json(get(app.clone(), "/v1/notes/categories").await).await;
    assert_eq!(list, json!([]));
    let notes = body_json(get(app, &format!("/v1/notes/notes/{id}")).await).await;
    assert_eq!(notes, json!([]));
}

#[tokio::test]
async fn delete_unknown_category_returns_404() {
    let app = common::build_test_app();
    let id = uuid::Uuid::new_v4();
    let response = delete(app, &format!("/v1/notes/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
