//! [`NoteStore`] backed by PostgreSQL.
//!
//! Every mutation runs inside one transaction. Child rows are deleted
//! explicitly rather than left to `ON DELETE CASCADE` so the returned row
//! counts include them. Each call goes through the store's [`RetryPolicy`].

use std::collections::HashMap;

use async_trait::async_trait;
use notemaster_core::entities::{Category, ChildUpdate, Note, Tag};
use notemaster_core::error::CoreError;
use notemaster_core::store::{NoteStore, StoreCounts};
use notemaster_core::types::DbId;
use sqlx::PgConnection;

use crate::errors::to_core_error;
use crate::models::note::NoteRow;
use crate::models::tag::TagRow;
use crate::repositories::{CategoryRepo, NoteRepo, TagRepo};
use crate::retry::RetryPolicy;
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgNoteStore {
    pool: DbPool,
    retry: RetryPolicy,
}

impl PgNoteStore {
    pub fn new(pool: DbPool, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn insert_category_tx(&self, category: &Category) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = write_category(&mut tx, category).await?;
        tx.commit().await?;
        Ok(rows)
    }

    async fn update_category_tx(
        &self,
        category: &Category,
        children: ChildUpdate,
    ) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut rows = CategoryRepo::update(&mut tx, category.id(), category.name()).await?;
        if rows == 0 {
            return Ok(0);
        }
        if children == ChildUpdate::Replace {
            rows += NoteRepo::delete_by_category(&mut tx, category.id()).await?;
            rows += TagRepo::delete_by_category(&mut tx, category.id()).await?;
            for tag in category.tags().unwrap_or_default() {
                rows += write_tag(&mut tx, tag).await?;
            }
        }
        tx.commit().await?;
        Ok(rows)
    }

    async fn delete_category_tx(&self, id: DbId) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut rows = NoteRepo::delete_by_category(&mut tx, id).await?;
        rows += TagRepo::delete_by_category(&mut tx, id).await?;
        rows += CategoryRepo::delete(&mut tx, id).await?;
        tx.commit().await?;
        Ok(rows)
    }

    async fn insert_tag_tx(&self, tag: &Tag) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = write_tag(&mut tx, tag).await?;
        tx.commit().await?;
        Ok(rows)
    }

    async fn update_tag_tx(&self, tag: &Tag, children: ChildUpdate) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut rows = TagRepo::update(&mut tx, tag.id(), tag.category_id(), tag.name()).await?;
        if rows == 0 {
            return Ok(0);
        }
        if children == ChildUpdate::Replace {
            rows += NoteRepo::delete_by_tag(&mut tx, tag.id()).await?;
            for note in tag.notes().unwrap_or_default() {
                rows += NoteRepo::insert(&mut tx, note.id(), note.tag_id(), note.body()).await?;
            }
        }
        tx.commit().await?;
        Ok(rows)
    }

    async fn delete_tag_tx(&self, id: DbId) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut rows = NoteRepo::delete_by_tag(&mut tx, id).await?;
        rows += TagRepo::delete(&mut tx, id).await?;
        tx.commit().await?;
        Ok(rows)
    }

    async fn insert_note_tx(&self, note: &Note) -> Result<u64, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        NoteRepo::insert(&mut conn, note.id(), note.tag_id(), note.body()).await
    }

    async fn update_note_tx(&self, note: &Note) -> Result<u64, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        NoteRepo::update(&mut conn, note.id(), note.tag_id(), note.body()).await
    }

    async fn delete_note_tx(&self, id: DbId) -> Result<u64, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        NoteRepo::delete(&mut conn, id).await
    }

    async fn load_category(&self, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let Some(row) = CategoryRepo::find_by_id(&self.pool, id).await? else {
            return Ok(None);
        };
        let tags = self.load_tags(&[id]).await?;
        Ok(Some(row.into_category(tags)))
    }

    async fn load_categories(&self) -> Result<Vec<Category>, sqlx::Error> {
        let rows = CategoryRepo::list(&self.pool).await?;
        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();

        let mut tags_by_category: HashMap<DbId, Vec<Tag>> = HashMap::new();
        for tag in self.load_tags(&ids).await? {
            tags_by_category.entry(tag.category_id()).or_default().push(tag);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let tags = tags_by_category.remove(&row.id).unwrap_or_default();
                row.into_category(tags)
            })
            .collect())
    }

    /// Tags of the given categories with their notes attached.
    async fn load_tags(&self, category_ids: &[DbId]) -> Result<Vec<Tag>, sqlx::Error> {
        let rows = TagRepo::list_by_categories(&self.pool, category_ids).await?;
        let tag_ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let notes = NoteRepo::list_by_tags(&self.pool, &tag_ids).await?;
        Ok(attach_notes(rows, notes))
    }

    async fn load_tag(&self, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let Some(row) = TagRepo::find_detail(&self.pool, id).await? else {
            return Ok(None);
        };
        let notes = NoteRepo::list_by_tags(&self.pool, &[id]).await?;
        Ok(Some(row.into_tag(notes.into_iter().map(Note::from).collect())))
    }

    async fn load_counts(&self) -> Result<StoreCounts, sqlx::Error> {
        Ok(StoreCounts {
            categories: CategoryRepo::count(&self.pool).await?.max(0) as u64,
            tags: TagRepo::count(&self.pool).await?.max(0) as u64,
            notes: NoteRepo::count(&self.pool).await?.max(0) as u64,
        })
    }
}

async fn write_category(conn: &mut PgConnection, category: &Category) -> Result<u64, sqlx::Error> {
    let mut rows = CategoryRepo::insert(conn, category.id(), category.name()).await?;
    for tag in category.tags().unwrap_or_default() {
        rows += write_tag(conn, tag).await?;
    }
    Ok(rows)
}

async fn write_tag(conn: &mut PgConnection, tag: &Tag) -> Result<u64, sqlx::Error> {
    let mut rows = TagRepo::insert(conn, tag.id(), tag.category_id(), tag.name()).await?;
    for note in tag.notes().unwrap_or_default() {
        rows += NoteRepo::insert(conn, note.id(), note.tag_id(), note.body()).await?;
    }
    Ok(rows)
}

fn attach_notes(tags: Vec<TagRow>, notes: Vec<NoteRow>) -> Vec<Tag> {
    let mut notes_by_tag: HashMap<DbId, Vec<Note>> = HashMap::new();
    for note in notes {
        notes_by_tag.entry(note.tag_id).or_default().push(note.into());
    }
    tags.into_iter()
        .map(|row| {
            let notes = notes_by_tag.remove(&row.id).unwrap_or_default();
            row.into_tag(notes)
        })
        .collect()
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(to_core_error)
    }

    async fn counts(&self) -> Result<StoreCounts, CoreError> {
        self.retry
            .run("counts", || self.load_counts())
            .await
            .map_err(to_core_error)
    }

    async fn insert_category(&self, category: &Category) -> Result<u64, CoreError> {
        self.retry
            .run("insert_category", || self.insert_category_tx(category))
            .await
            .map_err(to_core_error)
    }

    async fn find_category(&self, id: DbId) -> Result<Option<Category>, CoreError> {
        self.retry
            .run("find_category", || self.load_category(id))
            .await
            .map_err(to_core_error)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        self.retry
            .run("list_categories", || self.load_categories())
            .await
            .map_err(to_core_error)
    }

    async fn update_category(
        &self,
        category: &Category,
        children: ChildUpdate,
    ) -> Result<u64, CoreError> {
        self.retry
            .run("update_category", || self.update_category_tx(category, children))
            .await
            .map_err(to_core_error)
    }

    async fn delete_category(&self, id: DbId) -> Result<u64, CoreError> {
        self.retry
            .run("delete_category", || self.delete_category_tx(id))
            .await
            .map_err(to_core_error)
    }

    async fn insert_tag(&self, tag: &Tag) -> Result<u64, CoreError> {
        self.retry
            .run("insert_tag", || self.insert_tag_tx(tag))
            .await
            .map_err(to_core_error)
    }

    async fn find_tag(&self, id: DbId) -> Result<Option<Tag>, CoreError> {
        self.retry
            .run("find_tag", || self.load_tag(id))
            .await
            .map_err(to_core_error)
    }

    async fn list_tags_by_category(&self, category_id: DbId) -> Result<Vec<Tag>, CoreError> {
        let ids = [category_id];
        self.retry
            .run("list_tags_by_category", || self.load_tags(&ids))
            .await
            .map_err(to_core_error)
    }

    async fn update_tag(&self, tag: &Tag, children: ChildUpdate) -> Result<u64, CoreError> {
        self.retry
            .run("update_tag", || self.update_tag_tx(tag, children))
            .await
            .map_err(to_core_error)
    }

    async fn delete_tag(&self, id: DbId) -> Result<u64, CoreError> {
        self.retry
            .run("delete_tag", || self.delete_tag_tx(id))
            .await
            .map_err(to_core_error)
    }

    async fn insert_note(&self, note: &Note) -> Result<u64, CoreError> {
        self.retry
            .run("insert_note", || self.insert_note_tx(note))
            .await
            .map_err(to_core_error)
    }

    async fn find_note(&self, id: DbId) -> Result<Option<Note>, CoreError> {
        self.retry
            .run("find_note", || async move {
                let row = NoteRepo::find_detail(&self.pool, id).await?;
                Ok::<_, sqlx::Error>(row.map(Note::from))
            })
            .await
            .map_err(to_core_error)
    }

    async fn list_notes_by_tag(&self, tag_id: DbId) -> Result<Vec<Note>, CoreError> {
        self.retry
            .run("list_notes_by_tag", || async move {
                let rows = NoteRepo::list_detail_by_tag(&self.pool, tag_id).await?;
                Ok::<_, sqlx::Error>(rows.into_iter().map(Note::from).collect())
            })
            .await
            .map_err(to_core_error)
    }

    async fn list_notes_by_category(&self, category_id: DbId) -> Result<Vec<Note>, CoreError> {
        self.retry
            .run("list_notes_by_category", || async move {
                let rows = NoteRepo::list_detail_by_category(&self.pool, category_id).await?;
                Ok::<_, sqlx::Error>(rows.into_iter().map(Note::from).collect())
            })
            .await
            .map_err(to_core_error)
    }

    async fn update_note(&self, note: &Note) -> Result<u64, CoreError> {
        self.retry
            .run("update_note", || self.update_note_tx(note))
            .await
            .map_err(to_core_error)
    }

    async fn delete_note(&self, id: DbId) -> Result<u64, CoreError> {
        self.retry
            .run("delete_note", || self.delete_note_tx(id))
            .await
            .map_err(to_core_error)
    }
}
