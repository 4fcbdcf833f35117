use std::sync::Arc;

use notemaster_core::commands::{
    CategoryCreateCommand, CategoryUpdateCommand, NoteCreateCommand, NoteUpdateCommand,
    TagCreateCommand, TagUpdateCommand,
};
use notemaster_core::entities::{Category, Note, Tag};
use notemaster_core::error::CoreError;
use notemaster_core::result::OperationResult;
use notemaster_core::store::{NoteStore, StoreCounts};
use notemaster_core::types::DbId;

/// Create, update, delete and query categories, tags and notes.
///
/// Mutations never return `Err`: success and failure are both reported as an
/// [`OperationResult`]. Reads return the entity or the failure envelope.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

fn missing(entity: &str, id: DbId) -> OperationResult {
    OperationResult::not_found(format!("Cannot locate existing {entity} for ID: '{id}'"))
}

/// Log a store failure and wrap it in an envelope.
fn failed(operation: &'static str, err: CoreError) -> OperationResult {
    tracing::warn!(operation, error = %err, "Note operation failed");
    OperationResult::from_error(&err)
}

/// Envelope for a write against a row that was found beforehand. Zero rows
/// means the row went away between the lookup and the write.
fn written(entity: &str, id: DbId, rows: u64) -> OperationResult {
    if rows == 0 {
        tracing::warn!(entity, %id, "Row removed before write");
        return missing(entity, id);
    }
    OperationResult::success(rows)
}

fn created(rows: u64, id: DbId) -> OperationResult {
    OperationResult::success(rows).with_info("id", id.to_string())
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// Reachability of the backing store.
    pub async fn ping(&self) -> Result<(), CoreError> {
        self.store.ping().await
    }

    pub async fn counts(&self) -> Result<StoreCounts, CoreError> {
        self.store.counts().await
    }

    // -----------------------------------------------------------------------
    // Categories
    // -----------------------------------------------------------------------

    /// Create a category along with any tags and notes nested in the command.
    pub async fn create_category(&self, command: CategoryCreateCommand) -> OperationResult {
        let category = Category::new(command);
        match self.store.insert_category(&category).await {
            Ok(rows) => {
                tracing::info!(
                    category_id = %category.id(),
                    rows,
                    expected_rows = category.row_count(),
                    "Category created",
                );
                created(rows, category.id())
            }
            Err(err) => failed("create_category", err),
        }
    }

    pub async fn update_category(&self, command: CategoryUpdateCommand) -> OperationResult {
        let mut category = match self.store.find_category(command.id).await {
            Ok(Some(category)) => category,
            Ok(None) => return missing("category", command.id),
            Err(err) => return failed("update_category", err),
        };

        let children = category.update(command);
        match self.store.update_category(&category, children).await {
            Ok(rows) => written("category", category.id(), rows),
            Err(err) => failed("update_category", err),
        }
    }

    /// Delete a category together with its tags and their notes.
    pub async fn delete_category(&self, id: DbId) -> OperationResult {
        match self.store.find_category(id).await {
            Ok(Some(_)) => {}
            Ok(None) => return missing("category", id),
            Err(err) => return failed("delete_category", err),
        }

        match self.store.delete_category(id).await {
            Ok(rows) => {
                tracing::info!(category_id = %id, rows, "Category deleted");
                written("category", id, rows)
            }
            Err(err) => failed("delete_category", err),
        }
    }

    pub async fn get_category_by_id(&self, id: DbId) -> Result<Category, OperationResult> {
        match self.store.find_category(id).await {
            Ok(Some(category)) => Ok(category),
            Ok(None) => Err(missing("category", id)),
            Err(err) => Err(failed("get_category_by_id", err)),
        }
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, OperationResult> {
        self.store
            .list_categories()
            .await
            .map_err(|err| failed("get_categories", err))
    }

    // -----------------------------------------------------------------------
    // Tags
    // -----------------------------------------------------------------------

    pub async fn create_tag(&self, command: TagCreateCommand) -> OperationResult {
        let tag = Tag::new(command);
        match self.store.insert_tag(&tag).await {
            Ok(rows) => {
                tracing::info!(
                    tag_id = %tag.id(),
                    category_id = %tag.category_id(),
                    rows,
                    expected_rows = tag.row_count(),
                    "Tag created",
                );
                created(rows, tag.id())
            }
            Err(err) => failed("create_tag", err),
        }
    }

    pub async fn update_tag(&self, command: TagUpdateCommand) -> OperationResult {
        let mut tag = match self.store.find_tag(command.id).await {
            Ok(Some(tag)) => tag,
            Ok(None) => return missing("tag", command.id),
            Err(err) => return failed("update_tag", err),
        };

        let children = tag.update(command);
        match self.store.update_tag(&tag, children).await {
            Ok(rows) => written("tag", tag.id(), rows),
            Err(err) => failed("update_tag", err),
        }
    }

    pub async fn delete_tag(&self, id: DbId) -> OperationResult {
        match self.store.find_tag(id).await {
            Ok(Some(_)) => {}
            Ok(None) => return missing("tag", id),
            Err(err) => return failed("delete_tag", err),
        }

        match self.store.delete_tag(id).await {
            Ok(rows) => written("tag", id, rows),
            Err(err) => failed("delete_tag", err),
        }
    }

    pub async fn get_tag_by_id(&self, id: DbId) -> Result<Tag, OperationResult> {
        match self.store.find_tag(id).await {
            Ok(Some(tag)) => Ok(tag),
            Ok(None) => Err(missing("tag", id)),
            Err(err) => Err(failed("get_tag_by_id", err)),
        }
    }

    /// Tags under a category. An unknown category yields an empty list.
    pub async fn get_tags_by_category(&self, category_id: DbId) -> Result<Vec<Tag>, OperationResult> {
        self.store
            .list_tags_by_category(category_id)
            .await
            .map_err(|err| failed("get_tags_by_category", err))
    }

    // -----------------------------------------------------------------------
    // Notes
    // -----------------------------------------------------------------------

    pub async fn create_note(&self, command: NoteCreateCommand) -> OperationResult {
        let note = Note::new(command);
        match self.store.insert_note(&note).await {
            Ok(rows) => {
                tracing::info!(note_id = %note.id(), tag_id = %note.tag_id(), "Note created");
                created(rows, note.id())
            }
            Err(err) => failed("create_note", err),
        }
    }

    pub async fn update_note(&self, command: NoteUpdateCommand) -> OperationResult {
        let mut note = match self.store.find_note(command.id).await {
            Ok(Some(note)) => note,
            Ok(None) => return missing("note", command.id),
            Err(err) => return failed("update_note", err),
        };

        note.update(command);
        match self.store.update_note(&note).await {
            Ok(rows) => written("note", note.id(), rows),
            Err(err) => failed("update_note", err),
        }
    }

    pub async fn delete_note(&self, id: DbId) -> OperationResult {
        match self.store.find_note(id).await {
            Ok(Some(_)) => {}
            Ok(None) => return missing("note", id),
            Err(err) => return failed("delete_note", err),
        }

        match self.store.delete_note(id).await {
            Ok(rows) => written("note", id, rows),
            Err(err) => failed("delete_note", err),
        }
    }

    pub async fn get_note_by_id(&self, id: DbId) -> Result<Note, OperationResult> {
        match self.store.find_note(id).await {
            Ok(Some(note)) => Ok(note),
            Ok(None) => Err(missing("note", id)),
            Err(err) => Err(failed("get_note_by_id", err)),
        }
    }

    pub async fn get_notes_by_tag(&self, tag_id: DbId) -> Result<Vec<Note>, OperationResult> {
        self.store
            .list_notes_by_tag(tag_id)
            .await
            .map_err(|err| failed("get_notes_by_tag", err))
    }

    /// Notes under every tag of the category.
    pub async fn get_notes_by_category(
        &self,
        category_id: DbId,
    ) -> Result<Vec<Note>, OperationResult> {
        self.store
            .list_notes_by_category(category_id)
            .await
            .map_err(|err| failed("get_notes_by_category", err))
    }
}
