//! Repository for the `notes` table.

use notemaster_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::note::{NoteDetailRow, NoteRow};

const COLUMNS: &str = "id, tag_id, body";

/// Note columns joined with the owning tag and its category.
const DETAIL_SELECT: &str = "SELECT n.id, n.tag_id, n.body, t.name AS tag_name, \
     t.category_id, c.name AS category_name \
     FROM notes n \
     JOIN tags t ON t.id = n.tag_id \
     JOIN categories c ON c.id = t.category_id";

pub struct NoteRepo;

impl NoteRepo {
    pub async fn insert(
        conn: &mut PgConnection,
        id: DbId,
        tag_id: DbId,
        body: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO notes (id, tag_id, body) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(tag_id)
            .bind(body)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<NoteDetailRow>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE n.id = $1");
        sqlx::query_as::<_, NoteDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Bare notes under any of the given tags, used to fill child collections.
    pub async fn list_by_tags(pool: &PgPool, tag_ids: &[DbId]) -> Result<Vec<NoteRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE tag_id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(tag_ids)
            .fetch_all(pool)
            .await
    }

    pub async fn list_detail_by_tag(
        pool: &PgPool,
        tag_id: DbId,
    ) -> Result<Vec<NoteDetailRow>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE n.tag_id = $1 ORDER BY n.id");
        sqlx::query_as::<_, NoteDetailRow>(&query)
            .bind(tag_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_detail_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<NoteDetailRow>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE t.category_id = $1 ORDER BY n.id");
        sqlx::query_as::<_, NoteDetailRow>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        tag_id: DbId,
        body: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE notes SET tag_id = $2, body = $3 WHERE id = $1")
            .bind(id)
            .bind(tag_id)
            .bind(body)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_tag(conn: &mut PgConnection, tag_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE tag_id = $1")
            .bind(tag_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete every note under any tag of the category.
    pub async fn delete_by_category(
        conn: &mut PgConnection,
        category_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM notes WHERE tag_id IN (SELECT id FROM tags WHERE category_id = $1)",
        )
        .bind(category_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notes")
            .fetch_one(pool)
            .await
    }
}
