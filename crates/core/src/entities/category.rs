use std::hash::{Hash, Hasher};

use crate::commands::{CategoryCreateCommand, CategoryUpdateCommand, TagCreateCommand};
use crate::entities::{ChildUpdate, Tag};
use crate::types::{new_id, DbId};

/// Top-level container of tags.
///
/// Two categories are equal when their `id` and `name` match; children are
/// not compared. Hashing uses the `id` alone.
#[derive(Debug, Clone)]
pub struct Category {
    id: DbId,
    name: String,
    tags: Option<Vec<Tag>>,
}

impl Category {
    /// Build a new category from a create command.
    ///
    /// Nested tag commands are re-parented onto the new category before the
    /// tags are built, whatever `category_id` the client sent.
    pub fn new(command: CategoryCreateCommand) -> Self {
        let id = command.id.unwrap_or_else(new_id);
        Self {
            id,
            name: command.name,
            tags: command.tags.map(|cmds| build_tags(id, cmds)),
        }
    }

    /// Rebuild a category that already exists in a store. Only store
    /// implementations call this; it performs no cascading.
    #[doc(hidden)]
    pub fn hydrate(id: DbId, name: String, tags: Option<Vec<Tag>>) -> Self {
        Self { id, name, tags }
    }

    /// Overwrite the category with the command's values.
    ///
    /// The command's `id` is taken as-is. When the command carries tags they
    /// replace the current ones.
    pub fn update(&mut self, command: CategoryUpdateCommand) -> ChildUpdate {
        self.id = command.id;
        self.name = command.name;

        match command.tags {
            Some(cmds) => {
                self.tags = Some(build_tags(self.id, cmds));
                ChildUpdate::Replace
            }
            None => ChildUpdate::Keep,
        }
    }

    pub fn id(&self) -> DbId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child tags, if they were loaded or supplied.
    pub fn tags(&self) -> Option<&[Tag]> {
        self.tags.as_deref()
    }

    /// Number of rows this category occupies: itself, its tags and their notes.
    pub fn row_count(&self) -> u64 {
        1 + self
            .tags()
            .unwrap_or_default()
            .iter()
            .map(Tag::row_count)
            .sum::<u64>()
    }
}

fn build_tags(category_id: DbId, commands: Vec<TagCreateCommand>) -> Vec<Tag> {
    commands
        .into_iter()
        .map(|mut cmd| {
            cmd.category_id = category_id;
            Tag::new(cmd)
        })
        .collect()
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::NoteCreateCommand;
    use uuid::Uuid;

    fn tag_cmd(name: &str, notes: usize) -> TagCreateCommand {
        TagCreateCommand {
            id: None,
            category_id: Uuid::new_v4(),
            name: name.to_string(),
            notes: Some(
                (0..notes)
                    .map(|i| NoteCreateCommand {
                        id: None,
                        tag_id: Uuid::new_v4(),
                        body: Some(format!("note {i}")),
                    })
                    .collect(),
            ),
        }
    }

    #[test]
    fn new_assigns_an_id_when_none_is_supplied() {
        let a = Category::new(CategoryCreateCommand {
            name: "Work".into(),
            ..Default::default()
        });
        let b = Category::new(CategoryCreateCommand {
            name: "Work".into(),
            ..Default::default()
        });
        assert!(!a.id().is_nil());
        assert_ne!(a.id(), b.id());
        assert!(a.tags().is_none());
    }

    #[test]
    fn new_keeps_a_client_supplied_id() {
        let id = Uuid::new_v4();
        let category = Category::new(CategoryCreateCommand {
            id: Some(id),
            name: "Home".into(),
            tags: None,
        });
        assert_eq!(category.id(), id);
        assert_eq!(category.name(), "Home");
    }

    #[test]
    fn nested_tags_and_notes_are_reparented() {
        let category = Category::new(CategoryCreateCommand {
            id: None,
            name: "Work".into(),
            tags: Some(vec![tag_cmd("a", 2), tag_cmd("b", 3)]),
        });

        let tags = category.tags().unwrap();
        assert_eq!(tags.len(), 2);
        for tag in tags {
            assert_eq!(tag.category_id(), category.id());
            for note in tag.notes().unwrap() {
                assert_eq!(note.tag_id(), tag.id());
            }
        }
        assert_eq!(category.row_count(), 1 + 2 + 5);
    }

    #[test]
    fn update_without_tags_keeps_children() {
        let mut category = Category::new(CategoryCreateCommand {
            id: None,
            name: "Work".into(),
            tags: Some(vec![tag_cmd("a", 1)]),
        });
        let id = category.id();

        let change = category.update(CategoryUpdateCommand {
            id,
            name: "Office".into(),
            tags: None,
        });

        assert_eq!(change, ChildUpdate::Keep);
        assert_eq!(category.name(), "Office");
        assert_eq!(category.tags().unwrap().len(), 1);
    }

    #[test]
    fn update_with_tags_replaces_children() {
        let mut category = Category::new(CategoryCreateCommand {
            id: None,
            name: "Work".into(),
            tags: Some(vec![tag_cmd("a", 1), tag_cmd("b", 1)]),
        });
        let id = category.id();

        let change = category.update(CategoryUpdateCommand {
            id,
            name: "Work".into(),
            tags: Some(vec![tag_cmd("c", 0)]),
        });

        assert_eq!(change, ChildUpdate::Replace);
        let tags = category.tags().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name(), "c");
        assert_eq!(tags[0].category_id(), id);
    }

    #[test]
    fn no_op_update_is_structurally_equal() {
        let original = Category::new(CategoryCreateCommand {
            id: None,
            name: "Work".into(),
            tags: None,
        });
        let mut updated = original.clone();
        updated.update(CategoryUpdateCommand {
            id: original.id(),
            name: original.name().to_string(),
            tags: None,
        });
        assert_eq!(original, updated);
    }

    #[test]
    fn equality_ignores_children() {
        let id = Uuid::new_v4();
        let bare = Category::hydrate(id, "Work".into(), None);
        let loaded = Category::hydrate(id, "Work".into(), Some(Vec::new()));
        let renamed = Category::hydrate(id, "Play".into(), None);
        assert_eq!(bare, loaded);
        assert_ne!(bare, renamed);
    }

    #[test]
    fn hydrate_keeps_stored_children_as_loaded() {
        let id = Uuid::new_v4();
        let other = Uuid::new_v4();
        let stored = Tag::hydrate(Uuid::new_v4(), other, "a".into(), None, None);

        let category = Category::hydrate(id, "Work".into(), Some(vec![stored]));

        assert_eq!(category.tags().unwrap()[0].category_id(), other);
    }
}
