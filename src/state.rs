//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::ShortenerService;
use crate::infrastructure::persistence::SqliteUrlRepository;

/// Shortener service backed by the SQLite repository.
pub type Shortener = ShortenerService<SqliteUrlRepository>;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<Shortener>,
    pub repository: Arc<SqliteUrlRepository>,
    /// Public origin used to compose full short links, without trailing slash.
    pub base_url: String,
}

impl AppState {
    pub fn new(repository: Arc<SqliteUrlRepository>, shortener: Shortener, base_url: &str) -> Self {
        Self {
            shortener: Arc::new(shortener),
            repository,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full public link for `key`.
    pub fn short_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}
