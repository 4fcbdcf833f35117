use std::hash::{Hash, Hasher};

use crate::commands::{NoteCreateCommand, NoteUpdateCommand};
use crate::entities::TagRef;
use crate::types::{new_id, DbId};

/// A free-text note filed under exactly one tag.
///
/// Equality compares `id`, `tag_id` and `body`; hashing uses `id`.
#[derive(Debug, Clone)]
pub struct Note {
    id: DbId,
    tag_id: DbId,
    body: Option<String>,
    tag: Option<TagRef>,
}

impl Note {
    pub fn new(command: NoteCreateCommand) -> Self {
        Self {
            id: command.id.unwrap_or_else(new_id),
            tag_id: command.tag_id,
            body: command.body,
            tag: None,
        }
    }

    /// Rebuild a note that already exists in a store. Only store
    /// implementations call this; it performs no cascading.
    #[doc(hidden)]
    pub fn hydrate(id: DbId, tag_id: DbId, body: Option<String>, tag: Option<TagRef>) -> Self {
        Self {
            id,
            tag_id,
            body,
            tag,
        }
    }

    /// Overwrite every field with the command's values. A note moved to a
    /// different tag loses its stale back-reference.
    pub fn update(&mut self, command: NoteUpdateCommand) {
        if command.tag_id != self.tag_id {
            self.tag = None;
        }
        self.id = command.id;
        self.tag_id = command.tag_id;
        self.body = command.body;
    }

    pub fn id(&self) -> DbId {
        self.id
    }

    pub fn tag_id(&self) -> DbId {
        self.tag_id
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Parent tag and category, when the store loaded them.
    pub fn tag(&self) -> Option<&TagRef> {
        self.tag.as_ref()
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.tag_id == other.tag_id && self.body == other.body
    }
}

impl Eq for Note {}

impl Hash for Note {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
