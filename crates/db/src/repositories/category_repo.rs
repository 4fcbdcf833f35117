//! Repository for the `categories` table.

use notemaster_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::category::CategoryRow;

const COLUMNS: &str = "id, name";

pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn insert(
        conn: &mut PgConnection,
        id: DbId,
        name: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO categories (id, name) VALUES ($1, $2)")
            .bind(id)
            .bind(name)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CategoryRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, CategoryRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All categories ordered by name, ties broken by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<CategoryRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name, id");
        sqlx::query_as::<_, CategoryRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Returns `0` when no category has the given id.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        name: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE categories SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete the category row only. Callers remove children first when they
    /// need them counted; otherwise the foreign keys cascade.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(pool)
            .await
    }
}
