//! SQLite implementation of the URL repository.

use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord, UrlStatus};
use crate::domain::repositories::{UrlRepository, UrlStats};
use crate::error::AppError;

/// Row shape of the `urls` table.
#[derive(Debug, FromRow)]
struct UrlRow {
    id: i64,
    key: String,
    secret_key: String,
    target_url: String,
    is_active: bool,
    clicks: i64,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::new(
            row.id,
            row.key,
            row.secret_key,
            row.target_url,
            UrlStatus::from_flag(row.is_active),
            row.clicks,
        )
    }
}

/// SQLite repository for URL records.
///
/// Connections are checked out of the pool per statement and returned when
/// the statement completes, on success and on error alike. Uniqueness of
/// `key` and `secret_key` is enforced by unique indexes.
pub struct SqliteUrlRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for SqliteUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (key, secret_key, target_url, is_active, clicks)
            VALUES (?1, ?2, ?3, TRUE, 0)
            RETURNING id, key, secret_key, target_url, is_active, clicks
            "#,
        )
        .bind(&new_record.key)
        .bind(&new_record.secret_key)
        .bind(&new_record.target_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_active_by_key(&self, key: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, key, secret_key, target_url, is_active, clicks
            FROM urls
            WHERE key = ?1 AND is_active = TRUE
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn key_in_use(&self, candidate: &str) -> Result<bool, AppError> {
        let matches: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM urls WHERE key = ?1 OR secret_key = ?1",
        )
        .bind(candidate)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(matches > 0)
    }

    async fn find_by_secret_key(&self, secret_key: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, key, secret_key, target_url, is_active, clicks
            FROM urls
            WHERE secret_key = ?1
            "#,
        )
        .bind(secret_key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn deactivate(&self, secret_key: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE urls SET is_active = FALSE WHERE secret_key = ?1 AND is_active = TRUE",
        )
        .bind(secret_key)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_click(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE urls SET clicks = clicks + 1 WHERE id = ?1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn stats(&self) -> Result<UrlStats, AppError> {
        let (total, active, clicks): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COALESCE(SUM(CASE WHEN is_active THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(clicks), 0)
            FROM urls
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(UrlStats {
            total,
            active,
            clicks,
        })
    }
}
