//! Domain entities: categories contain tags, tags contain notes.
//!
//! Entities are built from a create command and mutated only through
//! `update`. Stores rebuild persisted rows with `hydrate`.

pub mod category;
pub mod note;
pub mod tag;

pub use category::Category;
pub use note::Note;
pub use tag::Tag;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// What an `update` did to the entity's child collection.
///
/// `Replace` tells the store to drop the persisted children and write the
/// entity's current ones in their place. The reported row count then covers
/// the parent plus every child deleted and every child reinserted, so a
/// no-op round trip of a category with one tag and two notes reports 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildUpdate {
    Keep,
    Replace,
}

/// Denormalized parent category carried on read paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: DbId,
    pub name: String,
}

/// Denormalized parent tag (and its category) carried on note read paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    pub id: DbId,
    pub name: String,
    pub category: CategoryRef,
}
