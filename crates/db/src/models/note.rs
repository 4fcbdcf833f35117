use notemaster_core::entities::{CategoryRef, Note, TagRef};
use notemaster_core::types::DbId;
use sqlx::FromRow;

/// A row from the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: DbId,
    pub tag_id: DbId,
    pub body: Option<String>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note::hydrate(row.id, row.tag_id, row.body, None)
    }
}

/// A note joined with its tag and the tag's category.
#[derive(Debug, Clone, FromRow)]
pub struct NoteDetailRow {
    pub id: DbId,
    pub tag_id: DbId,
    pub body: Option<String>,
    pub tag_name: String,
    pub category_id: DbId,
    pub category_name: String,
}

impl From<NoteDetailRow> for Note {
    fn from(row: NoteDetailRow) -> Self {
        let tag = TagRef {
            id: row.tag_id,
            name: row.tag_name,
            category: CategoryRef {
                id: row.category_id,
                name: row.category_name,
            },
        };
        Note::hydrate(row.id, row.tag_id, row.body, Some(tag))
    }
}
