use notemaster_core::entities::{Category, Tag};
use notemaster_core::types::DbId;
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: DbId,
    pub name: String,
}

impl CategoryRow {
    pub fn into_category(self, tags: Vec<Tag>) -> Category {
        Category::hydrate(self.id, self.name, Some(tags))
    }
}
