//! Persistence seam for the note hierarchy.
//!
//! The service layer talks to a [`NoteStore`]; the PostgreSQL implementation
//! lives in `notemaster-db` and an in-memory one in [`memory`].

pub mod memory;

pub use memory::MemoryNoteStore;

use async_trait::async_trait;
use serde::Serialize;

use crate::entities::{Category, ChildUpdate, Note, Tag};
use crate::error::CoreError;
use crate::types::DbId;

/// Row totals per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub categories: u64,
    pub tags: u64,
    pub notes: u64,
}

/// Storage for categories, tags and notes.
///
/// Mutating methods return the number of rows written or removed, counting
/// cascaded children. Reads load child collections eagerly. Referencing a
/// missing parent, or reusing an existing id, fails with
/// [`CoreError::Conflict`].
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), CoreError>;

    async fn counts(&self) -> Result<StoreCounts, CoreError>;

    /// Insert a category together with any tags and notes it carries.
    async fn insert_category(&self, category: &Category) -> Result<u64, CoreError>;
    /// Find a category with its tags and their notes.
    async fn find_category(&self, id: DbId) -> Result<Option<Category>, CoreError>;
    /// All categories with tags and notes, ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, CoreError>;
    /// Persist an updated category. With [`ChildUpdate::Replace`] the stored
    /// tags (and their notes) are swapped for the category's current ones.
    async fn update_category(
        &self,
        category: &Category,
        children: ChildUpdate,
    ) -> Result<u64, CoreError>;
    /// Delete a category, cascading to its tags and notes.
    async fn delete_category(&self, id: DbId) -> Result<u64, CoreError>;

    async fn insert_tag(&self, tag: &Tag) -> Result<u64, CoreError>;
    /// Find a tag with its notes and parent category reference.
    async fn find_tag(&self, id: DbId) -> Result<Option<Tag>, CoreError>;
    async fn list_tags_by_category(&self, category_id: DbId) -> Result<Vec<Tag>, CoreError>;
    async fn update_tag(&self, tag: &Tag, children: ChildUpdate) -> Result<u64, CoreError>;
    async fn delete_tag(&self, id: DbId) -> Result<u64, CoreError>;

    async fn insert_note(&self, note: &Note) -> Result<u64, CoreError>;
    /// Find a note with its tag and category references.
    async fn find_note(&self, id: DbId) -> Result<Option<Note>, CoreError>;
    async fn list_notes_by_tag(&self, tag_id: DbId) -> Result<Vec<Note>, CoreError>;
    /// Notes under every tag of the category.
    async fn list_notes_by_category(&self, category_id: DbId) -> Result<Vec<Note>, CoreError>;
    async fn update_note(&self, note: &Note) -> Result<u64, CoreError>;
    async fn delete_note(&self, id: DbId) -> Result<u64, CoreError>;
}
