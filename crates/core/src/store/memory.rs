//! In-memory [`NoteStore`] used by tests and the `memory` store backend.
//!
//! Mirrors the SQL schema's rules: primary keys are unique, foreign keys
//! must point at an existing parent, and deletes cascade. Every mutation is
//! applied to a copy of the tables and swapped in only when it succeeds, so
//! a failed call leaves no partial writes behind.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::entities::{Category, CategoryRef, ChildUpdate, Note, Tag, TagRef};
use crate::error::CoreError;
use crate::store::{NoteStore, StoreCounts};
use crate::types::DbId;

#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    tables: RwLock<Tables>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn mutate<F>(&self, apply: F) -> Result<u64, CoreError>
    where
        F: FnOnce(&mut Tables) -> Result<u64, CoreError> + Send,
    {
        let mut guard = self.tables.write().await;
        let mut next = guard.clone();
        let rows = apply(&mut next)?;
        *guard = next;
        Ok(rows)
    }
}

#[derive(Debug, Clone, Default)]
struct Tables {
    categories: BTreeMap<DbId, String>,
    tags: BTreeMap<DbId, TagRow>,
    notes: BTreeMap<DbId, NoteRow>,
}

#[derive(Debug, Clone)]
struct TagRow {
    category_id: DbId,
    name: String,
}

#[derive(Debug, Clone)]
struct NoteRow {
    tag_id: DbId,
    body: Option<String>,
}

fn duplicate(entity: &str, id: DbId) -> CoreError {
    CoreError::Conflict(format!("{entity} with id {id} already exists"))
}

fn missing_parent(entity: &str, id: DbId) -> CoreError {
    CoreError::Conflict(format!("referenced {entity} {id} does not exist"))
}

impl Tables {
    fn put_category(&mut self, category: &Category) -> Result<u64, CoreError> {
        if self.categories.contains_key(&category.id()) {
            return Err(duplicate("category", category.id()));
        }
        self.categories
            .insert(category.id(), category.name().to_string());

        let mut rows = 1;
        for tag in category.tags().unwrap_or_default() {
            rows += self.put_tag(tag)?;
        }
        Ok(rows)
    }

    fn put_tag(&mut self, tag: &Tag) -> Result<u64, CoreError> {
        if !self.categories.contains_key(&tag.category_id()) {
            return Err(missing_parent("category", tag.category_id()));
        }
        if self.tags.contains_key(&tag.id()) {
            return Err(duplicate("tag", tag.id()));
        }
        self.tags.insert(
            tag.id(),
            TagRow {
                category_id: tag.category_id(),
                name: tag.name().to_string(),
            },
        );

        let mut rows = 1;
        for note in tag.notes().unwrap_or_default() {
            rows += self.put_note(note)?;
        }
        Ok(rows)
    }

    fn put_note(&mut self, note: &Note) -> Result<u64, CoreError> {
        if !self.tags.contains_key(&note.tag_id()) {
            return Err(missing_parent("tag", note.tag_id()));
        }
        if self.notes.contains_key(&note.id()) {
            return Err(duplicate("note", note.id()));
        }
        self.notes.insert(
            note.id(),
            NoteRow {
                tag_id: note.tag_id(),
                body: note.body().map(str::to_string),
            },
        );
        Ok(1)
    }

    fn remove_category(&mut self, id: DbId) -> u64 {
        if self.categories.remove(&id).is_none() {
            return 0;
        }
        1 + self.remove_tags_of(id)
    }

    fn remove_tags_of(&mut self, category_id: DbId) -> u64 {
        let ids: Vec<DbId> = self
            .tags
            .iter()
            .filter(|(_, t)| t.category_id == category_id)
            .map(|(id, _)| *id)
            .collect();
        ids.into_iter().map(|id| self.remove_tag(id)).sum()
    }

    fn remove_tag(&mut self, id: DbId) -> u64 {
        if self.tags.remove(&id).is_none() {
            return 0;
        }
        1 + self.remove_notes_of(id)
    }

    fn remove_notes_of(&mut self, tag_id: DbId) -> u64 {
        let before = self.notes.len();
        self.notes.retain(|_, n| n.tag_id != tag_id);
        (before - self.notes.len()) as u64
    }

    fn category(&self, id: DbId) -> Option<Category> {
        let name = self.categories.get(&id)?;
        Some(Category::hydrate(id, name.clone(), Some(self.tags_of(id))))
    }

    fn tags_of(&self, category_id: DbId) -> Vec<Tag> {
        let mut tags: Vec<(&DbId, &TagRow)> = self
            .tags
            .iter()
            .filter(|(_, t)| t.category_id == category_id)
            .collect();
        tags.sort_by(|a, b| a.1.name.cmp(&b.1.name).then(a.0.cmp(b.0)));

        tags.into_iter()
            .map(|(id, row)| {
                Tag::hydrate(
                    *id,
                    row.category_id,
                    row.name.clone(),
                    Some(self.notes_of(*id)),
                    None,
                )
            })
            .collect()
    }

    fn notes_of(&self, tag_id: DbId) -> Vec<Note> {
        self.notes
            .iter()
            .filter(|(_, n)| n.tag_id == tag_id)
            .map(|(id, n)| Note::hydrate(*id, n.tag_id, n.body.clone(), None))
            .collect()
    }

    fn category_ref(&self, id: DbId) -> Option<CategoryRef> {
        self.categories.get(&id).map(|name| CategoryRef {
            id,
            name: name.clone(),
        })
    }

    fn tag_ref(&self, id: DbId) -> Option<TagRef> {
        let row = self.tags.get(&id)?;
        Some(TagRef {
            id,
            name: row.name.clone(),
            category: self.category_ref(row.category_id)?,
        })
    }

    fn note_detail(&self, id: DbId, row: &NoteRow) -> Note {
        Note::hydrate(id, row.tag_id, row.body.clone(), self.tag_ref(row.tag_id))
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }

    async fn counts(&self) -> Result<StoreCounts, CoreError> {
        let tables = self.tables.read().await;
        Ok(StoreCounts {
            categories: tables.categories.len() as u64,
            tags: tables.tags.len() as u64,
            notes: tables.notes.len() as u64,
        })
    }

    async fn insert_category(&self, category: &Category) -> Result<u64, CoreError> {
        self.mutate(|t| t.put_category(category)).await
    }

    async fn find_category(&self, id: DbId) -> Result<Option<Category>, CoreError> {
        Ok(self.tables.read().await.category(id))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables
            .categories
            .keys()
            .filter_map(|id| tables.category(*id))
            .collect();
        categories.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(categories)
    }

    async fn update_category(
        &self,
        category: &Category,
        children: ChildUpdate,
    ) -> Result<u64, CoreError> {
        self.mutate(|t| {
            let Some(name) = t.categories.get_mut(&category.id()) else {
                return Ok(0);
            };
            *name = category.name().to_string();

            let mut rows = 1;
            if children == ChildUpdate::Replace {
                rows += t.remove_tags_of(category.id());
                for tag in category.tags().unwrap_or_default() {
                    rows += t.put_tag(tag)?;
                }
            }
            Ok(rows)
        })
        .await
    }

    async fn delete_category(&self, id: DbId) -> Result<u64, CoreError> {
        self.mutate(|t| Ok(t.remove_category(id))).await
    }

    async fn insert_tag(&self, tag: &Tag) -> Result<u64, CoreError> {
        self.mutate(|t| t.put_tag(tag)).await
    }

    async fn find_tag(&self, id: DbId) -> Result<Option<Tag>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables.tags.get(&id).map(|row| {
            Tag::hydrate(
                id,
                row.category_id,
                row.name.clone(),
                Some(tables.notes_of(id)),
                tables.category_ref(row.category_id),
            )
        }))
    }

    async fn list_tags_by_category(&self, category_id: DbId) -> Result<Vec<Tag>, CoreError> {
        Ok(self.tables.read().await.tags_of(category_id))
    }

    async fn update_tag(&self, tag: &Tag, children: ChildUpdate) -> Result<u64, CoreError> {
        self.mutate(|t| {
            if !t.tags.contains_key(&tag.id()) {
                return Ok(0);
            }
            if !t.categories.contains_key(&tag.category_id()) {
                return Err(missing_parent("category", tag.category_id()));
            }
            t.tags.insert(
                tag.id(),
                TagRow {
                    category_id: tag.category_id(),
                    name: tag.name().to_string(),
                },
            );

            let mut rows = 1;
            if children == ChildUpdate::Replace {
                rows += t.remove_notes_of(tag.id());
                for note in tag.notes().unwrap_or_default() {
                    rows += t.put_note(note)?;
                }
            }
            Ok(rows)
        })
        .await
    }

    async fn delete_tag(&self, id: DbId) -> Result<u64, CoreError> {
        self.mutate(|t| Ok(t.remove_tag(id))).await
    }

    async fn insert_note(&self, note: &Note) -> Result<u64, CoreError> {
        self.mutate(|t| t.put_note(note)).await
    }

    async fn find_note(&self, id: DbId) -> Result<Option<Note>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables.notes.get(&id).map(|row| tables.note_detail(id, row)))
    }

    async fn list_notes_by_tag(&self, tag_id: DbId) -> Result<Vec<Note>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .iter()
            .filter(|(_, n)| n.tag_id == tag_id)
            .map(|(id, n)| tables.note_detail(*id, n))
            .collect())
    }

    async fn list_notes_by_category(&self, category_id: DbId) -> Result<Vec<Note>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .iter()
            .filter(|(_, n)| {
                tables
                    .tags
                    .get(&n.tag_id)
                    .is_some_and(|t| t.category_id == category_id)
            })
            .map(|(id, n)| tables.note_detail(*id, n))
            .collect())
    }

    async fn update_note(&self, note: &Note) -> Result<u64, CoreError> {
        self.mutate(|t| {
            if !t.notes.contains_key(&note.id()) {
                return Ok(0);
            }
            if !t.tags.contains_key(&note.tag_id()) {
                return Err(missing_parent("tag", note.tag_id()));
            }
            t.notes.insert(
                note.id(),
                NoteRow {
                    tag_id: note.tag_id(),
                    body: note.body().map(str::to_string),
                },
            );
            Ok(1)
        })
        .await
    }

    async fn delete_note(&self, id: DbId) -> Result<u64, CoreError> {
        self.mutate(|t| Ok(u64::from(t.notes.remove(&id).is_some())))
            .await
    }
}
