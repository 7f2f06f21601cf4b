#![allow(dead_code)]

use keyed_url_shortener::application::services::ShortenerService;
use keyed_url_shortener::infrastructure::persistence::{SqliteUrlRepository, pool};
use keyed_url_shortener::state::AppState;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

pub const TEST_BASE_URL: &str = "http://localhost:8000";

/// In-memory database with migrations applied.
///
/// A single connection that is never recycled: every connection to
/// `sqlite::memory:` opens its own empty database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    pool::migrate(&pool).await.unwrap();

    pool
}

pub fn create_test_repository(pool: &SqlitePool) -> Arc<SqliteUrlRepository> {
    Arc::new(SqliteUrlRepository::new(Arc::new(pool.clone())))
}

pub fn create_test_state(pool: &SqlitePool) -> AppState {
    let repository = create_test_repository(pool);
    let shortener = ShortenerService::new(repository.clone());

    AppState::new(repository, shortener, TEST_BASE_URL)
}

pub async fn create_test_url(pool: &SqlitePool, key: &str, secret_key: &str, url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO urls (key, secret_key, target_url) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(key)
    .bind(secret_key)
    .bind(url)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_inactive_url(pool: &SqlitePool, key: &str, secret_key: &str, url: &str) {
    sqlx::query(
        "INSERT INTO urls (key, secret_key, target_url, is_active) VALUES (?1, ?2, ?3, FALSE)",
    )
    .bind(key)
    .bind(secret_key)
    .bind(url)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn count_urls(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn clicks_for(pool: &SqlitePool, key: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM urls WHERE key = ?1")
        .bind(key)
        .fetch_one(pool)
        .await
        .unwrap()
}
