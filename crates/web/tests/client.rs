//! `NoteApiClient` against a live API backed by the in-memory store.

mod common;

use notemaster_core::models::{CategoryModel, NoteModel, TagModel};
use notemaster_core::types::DbId;
use notemaster_web::client::TRANSPORT_FAILURE;

fn created_id(result: &notemaster_core::result::OperationResult) -> DbId {
    result.info("id").unwrap().parse().unwrap()
}

#[tokio::test]
async fn category_tag_note_round_trip() {
    let base = common::spawn_api().await;
    let client = common::client(&base);

    let result = client
        .create_category(&CategoryModel {
            name: "Work".to_string(),
            ..Default::default()
        })
        .await;
    assert!(result.is_success, "{:?}", result.errors());
    let category_id = created_id(&result);

    let result = client
        .create_tag(&TagModel {
            category_id: Some(category_id),
            name: "meetings".to_string(),
            ..Default::default()
        })
        .await;
    let tag_id = created_id(&result);

    let result = client
        .create_note(&NoteModel {
            tag_id: Some(tag_id),
            body: Some("agenda".to_string()),
            ..Default::default()
        })
        .await;
    let note_id = created_id(&result);

    let note = client.get_note_by_id(note_id).await.unwrap();
    assert_eq!(note.body.as_deref(), Some("agenda"));
    assert_eq!(note.category.as_deref(), Some("Work"));

    let tags = client.get_tags_by_category(category_id).await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(client.get_notes_by_tag(tag_id).await.unwrap().len(), 1);
    assert_eq!(client.get_notes_by_category(category_id).await.unwrap().len(), 1);

    let result = client
        .update_note(&NoteModel {
            id: Some(note_id),
            tag_id: Some(tag_id),
            body: Some("minutes".to_string()),
            ..Default::default()
        })
        .await;
    assert!(result.is_success);

    let result = client
        .update_tag(&TagModel {
            id: Some(tag_id),
            category_id: Some(category_id),
            name: "standups".to_string(),
            ..Default::default()
        })
        .await;
    assert!(result.is_success);

    let result = client
        .update_category(&CategoryModel {
            id: Some(category_id),
            name: "Office".to_string(),
            ..Default::default()
        })
        .await;
    assert!(result.is_success);

    let category = client.get_category(category_id).await.unwrap();
    assert_eq!(category.name, "Office");
    let tags = category.tags.unwrap();
    assert_eq!(tags[0].name, "standups");
    assert_eq!(tags[0].notes.as_ref().unwrap()[0].body.as_deref(), Some("minutes"));

    assert_eq!(client.delete_note(note_id).await.affected_count, 1);
    assert_eq!(client.delete_tag(tag_id).await.affected_count, 1);
    assert_eq!(client.delete_category(category_id).await.affected_count, 1);
    assert!(client.get_categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_envelopes_are_passed_through() {
    let base = common::spawn_api().await;
    let client = common::client(&base);
    let id = DbId::new_v4();

    let result = client.delete_note(id).await;
    assert!(result.is_not_found());
    assert_eq!(
        result.messages(),
        [format!("Cannot locate existing note for ID: '{id}'").as_str()]
    );

    let err = client.get_category(id).await.unwrap_err();
    assert!(err.is_not_found());

    let result = client
        .create_category(&CategoryModel::default())
        .await;
    assert!(!result.is_success);
    assert!(result.has_error("name"));
}

#[tokio::test]
async fn transport_failure_synthesizes_server_error() {
    let base = common::closed_endpoint().await;
    let client = common::client(&base);

    let result = client
        .create_category(&CategoryModel {
            name: "Work".to_string(),
            ..Default::default()
        })
        .await;
    assert!(!result.is_success);
    assert_eq!(result.affected_count, 0);
    assert!(result.has_error("Error"));
    assert_eq!(result.messages(), [TRANSPORT_FAILURE]);

    let err = client.get_categories().await.unwrap_err();
    assert_eq!(err.messages(), [TRANSPORT_FAILURE]);
}

#[test]
fn trailing_slash_is_trimmed_from_base_url() {
    let client = common::client("http://localhost:3000/");
    assert_eq!(client.base_url(), "http://localhost:3000");
}
