use std::hash::{Hash, Hasher};

use crate::commands::{NoteCreateCommand, TagCreateCommand, TagUpdateCommand};
use crate::entities::{CategoryRef, ChildUpdate, Note};
use crate::types::{new_id, DbId};

/// A named group of notes inside one category.
///
/// Equality compares `id`, `category_id` and `name`; hashing uses `id`.
#[derive(Debug, Clone)]
pub struct Tag {
    id: DbId,
    category_id: DbId,
    name: String,
    notes: Option<Vec<Note>>,
    category: Option<CategoryRef>,
}

impl Tag {
    /// Build a new tag. Nested note commands are re-parented onto it.
    pub fn new(command: TagCreateCommand) -> Self {
        let id = command.id.unwrap_or_else(new_id);
        Self {
            id,
            category_id: command.category_id,
            name: command.name,
            notes: command.notes.map(|cmds| build_notes(id, cmds)),
            category: None,
        }
    }

    /// Rebuild a tag that already exists in a store. Only store
    /// implementations call this; it performs no cascading.
    #[doc(hidden)]
    pub fn hydrate(
        id: DbId,
        category_id: DbId,
        name: String,
        notes: Option<Vec<Note>>,
        category: Option<CategoryRef>,
    ) -> Self {
        Self {
            id,
            category_id,
            name,
            notes,
            category,
        }
    }

    /// Overwrite the tag. Notes in the command replace the current notes,
    /// and moving to another category drops the stale parent reference.
    pub fn update(&mut self, command: TagUpdateCommand) -> ChildUpdate {
        if command.category_id != self.category_id {
            self.category = None;
        }
        self.id = command.id;
        self.category_id = command.category_id;
        self.name = command.name;

        match command.notes {
            Some(cmds) => {
                self.notes = Some(build_notes(self.id, cmds));
                ChildUpdate::Replace
            }
            None => ChildUpdate::Keep,
        }
    }

    pub fn id(&self) -> DbId {
        self.id
    }

    pub fn category_id(&self) -> DbId {
        self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn notes(&self) -> Option<&[Note]> {
        self.notes.as_deref()
    }

    /// Parent category, when the store loaded it.
    pub fn category(&self) -> Option<&CategoryRef> {
        self.category.as_ref()
    }

    /// Rows occupied by this tag and its notes.
    pub fn row_count(&self) -> u64 {
        1 + self.notes().map_or(0, |notes| notes.len() as u64)
    }
}

fn build_notes(tag_id: DbId, commands: Vec<NoteCreateCommand>) -> Vec<Note> {
    commands
        .into_iter()
        .map(|mut cmd| {
            cmd.tag_id = tag_id;
            Note::new(cmd)
        })
        .collect()
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.category_id == other.category_id && self.name == other.name
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn note_cmd(body: &str) -> NoteCreateCommand {
        NoteCreateCommand {
            id: None,
            tag_id: Uuid::new_v4(),
            body: Some(body.to_string()),
        }
    }

    #[test]
    fn parent_id_wins_over_client_supplied_note_fk() {
        let tag = Tag::new(TagCreateCommand {
            id: None,
            category_id: Uuid::new_v4(),
            name: "urgent".into(),
            notes: Some(vec![note_cmd("one"), note_cmd("two")]),
        });

        let notes = tag.notes().unwrap();
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|n| n.tag_id() == tag.id()));
        assert_eq!(tag.row_count(), 3);
    }

    #[test]
    fn update_can_move_a_tag_to_another_category() {
        let mut tag = Tag::new(TagCreateCommand {
            id: None,
            category_id: Uuid::new_v4(),
            name: "urgent".into(),
            notes: None,
        });
        let target = Uuid::new_v4();

        let change = tag.update(TagUpdateCommand {
            id: tag.id(),
            category_id: target,
            name: "later".into(),
            notes: None,
        });

        assert_eq!(change, ChildUpdate::Keep);
        assert_eq!(tag.category_id(), target);
        assert_eq!(tag.name(), "later");
    }

    #[test]
    fn update_with_notes_replaces_instead_of_appending() {
        let mut tag = Tag::new(TagCreateCommand {
            id: None,
            category_id: Uuid::new_v4(),
            name: "urgent".into(),
            notes: Some(vec![note_cmd("old")]),
        });

        let change = tag.update(TagUpdateCommand {
            id: tag.id(),
            category_id: tag.category_id(),
            name: "urgent".into(),
            notes: Some(vec![note_cmd("new one"), note_cmd("new two")]),
        });

        assert_eq!(change, ChildUpdate::Replace);
        let bodies: Vec<_> = tag
            .notes()
            .unwrap()
            .iter()
            .map(|n| n.body().unwrap())
            .collect();
        assert_eq!(bodies, vec!["new one", "new two"]);
    }

    #[test]
    fn hash_set_deduplicates_by_id() {
        let id = Uuid::new_v4();
        let category_id = Uuid::new_v4();
        let mut set = HashSet::new();
        set.insert(Tag::hydrate(id, category_id, "a".into(), None, None));
        set.insert(Tag::hydrate(id, category_id, "a".into(), Some(vec![]), None));
        assert_eq!(set.len(), 1);
    }
}
