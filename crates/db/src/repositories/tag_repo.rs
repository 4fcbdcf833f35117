//! Repository for the `tags` table.

use notemaster_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::tag::{TagDetailRow, TagRow};

const COLUMNS: &str = "id, category_id, name";

/// Tag columns joined with the parent category's name.
const DETAIL_SELECT: &str = "SELECT t.id, t.category_id, t.name, c.name AS category_name \
     FROM tags t JOIN categories c ON c.id = t.category_id";

pub struct TagRepo;

impl TagRepo {
    pub async fn insert(
        conn: &mut PgConnection,
        id: DbId,
        category_id: DbId,
        name: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO tags (id, category_id, name) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(category_id)
            .bind(name)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<TagDetailRow>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE t.id = $1");
        sqlx::query_as::<_, TagDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Tags belonging to any of the given categories, ordered by name.
    pub async fn list_by_categories(
        pool: &PgPool,
        category_ids: &[DbId],
    ) -> Result<Vec<TagRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tags WHERE category_id = ANY($1) ORDER BY name, id"
        );
        sqlx::query_as::<_, TagRow>(&query)
            .bind(category_ids)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        category_id: DbId,
        name: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE tags SET category_id = $2, name = $3 WHERE id = $1")
            .bind(id)
            .bind(category_id)
            .bind(name)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_category(
        conn: &mut PgConnection,
        category_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE category_id = $1")
            .bind(category_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tags")
            .fetch_one(pool)
            .await
    }
}
