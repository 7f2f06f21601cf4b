//! Repository trait for URL record data access.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Aggregate counters over the whole store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlStats {
    pub total: i64,
    pub active: i64,
    pub clicks: i64,
}

/// Repository interface for URL records.
///
/// Each method is a single atomic operation from the caller's point of view.
/// The store is the only component that mutates records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a new active record with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ConstraintViolation`] if `key` or `secret_key`
    /// already exists. Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds the active record with the given public key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` if an active record matches
    /// - `Ok(None)` if nothing matches or the match is inactive
    async fn find_active_by_key(&self, key: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Returns true if `candidate` is already used as a public key or a secret
    /// key by any record, active or not.
    async fn key_in_use(&self, candidate: &str) -> Result<bool, AppError>;

    /// Finds a record by its secret key regardless of status.
    async fn find_by_secret_key(&self, secret_key: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Marks the record owning `secret_key` inactive.
    ///
    /// Returns `Ok(true)` if an active record was deactivated, `Ok(false)` if
    /// no record matches or it was already inactive.
    async fn deactivate(&self, secret_key: &str) -> Result<bool, AppError>;

    /// Increments the click counter of a record.
    async fn record_click(&self, id: i64) -> Result<(), AppError>;

    /// Returns aggregate counters over all records.
    async fn stats(&self) -> Result<UrlStats, AppError>;
}
