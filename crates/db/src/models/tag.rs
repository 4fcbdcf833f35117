use notemaster_core::entities::{CategoryRef, Note, Tag};
use notemaster_core::types::DbId;
use sqlx::FromRow;

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow)]
pub struct TagRow {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
}

impl TagRow {
    pub fn into_tag(self, notes: Vec<Note>) -> Tag {
        Tag::hydrate(self.id, self.category_id, self.name, Some(notes), None)
    }
}

/// A tag joined with its category's name.
#[derive(Debug, Clone, FromRow)]
pub struct TagDetailRow {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub category_name: String,
}

impl TagDetailRow {
    pub fn into_tag(self, notes: Vec<Note>) -> Tag {
        let category = CategoryRef {
            id: self.category_id,
            name: self.category_name,
        };
        Tag::hydrate(
            self.id,
            self.category_id,
            self.name,
            Some(notes),
            Some(category),
        )
    }
}
