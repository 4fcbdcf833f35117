//! Commands: plain input carriers used to create or update entities.
//!
//! Commands hold no validation logic. Required fields and length limits are
//! checked at the transport boundary (see [`crate::models`]) before a command
//! is built.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Create a category, optionally with nested tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryCreateCommand {
    /// Client-supplied id. A new one is generated when absent.
    pub id: Option<DbId>,
    pub name: String,
    pub tags: Option<Vec<TagCreateCommand>>,
}

/// Overwrite a category. When `tags` is present the category's tags are
/// replaced by the ones described here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryUpdateCommand {
    pub id: DbId,
    pub name: String,
    pub tags: Option<Vec<TagCreateCommand>>,
}

/// Create a tag, optionally with nested notes.
///
/// `category_id` is overwritten by the parent when the command is nested
/// inside a [`CategoryCreateCommand`] or [`CategoryUpdateCommand`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagCreateCommand {
    pub id: Option<DbId>,
    pub category_id: DbId,
    pub name: String,
    pub notes: Option<Vec<NoteCreateCommand>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagUpdateCommand {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub notes: Option<Vec<NoteCreateCommand>>,
}

/// Create a note. `tag_id` is overwritten when nested inside a tag command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteCreateCommand {
    pub id: Option<DbId>,
    pub tag_id: DbId,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteUpdateCommand {
    pub id: DbId,
    pub tag_id: DbId,
    pub body: Option<String>,
}
