//! Short URL creation and resolution service.

use std::sync::Arc;

use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, info, warn};

use crate::application::services::key_allocator::{DEFAULT_MAX_ATTEMPTS, KeyAllocator};
use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::key_generator::{DEFAULT_KEY_LENGTH, DEFAULT_SECRET_KEY_LENGTH, is_valid_key};
use crate::utils::url_validator::validate_target_url;

/// Default number of full allocate-and-insert retries after a unique
/// constraint violation.
pub const DEFAULT_INSERT_RETRIES: usize = 3;

/// Pause between insert retries.
const INSERT_RETRY_DELAY_MS: u64 = 10;

/// Key lengths and retry bounds used by [`ShortenerService`].
#[derive(Debug, Clone, Copy)]
pub struct ShortenerSettings {
    pub key_length: usize,
    pub secret_key_length: usize,
    pub max_key_attempts: usize,
    pub insert_retries: usize,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self {
            key_length: DEFAULT_KEY_LENGTH,
            secret_key_length: DEFAULT_SECRET_KEY_LENGTH,
            max_key_attempts: DEFAULT_MAX_ATTEMPTS,
            insert_retries: DEFAULT_INSERT_RETRIES,
        }
    }
}

/// Service issuing short keys and resolving them back to target URLs.
///
/// Public and secret keys share one namespace: a candidate is rejected if it
/// already appears in either column of any record, active or not. The secret
/// key is drawn independently of the public key and carries no prefix.
pub struct ShortenerService<R: UrlRepository> {
    repository: Arc<R>,
    allocator: KeyAllocator,
    settings: ShortenerSettings,
}

impl<R: UrlRepository> ShortenerService<R> {
    /// Creates a service with default settings.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_settings(repository, ShortenerSettings::default())
    }

    pub fn with_settings(repository: Arc<R>, settings: ShortenerSettings) -> Self {
        Self {
            repository,
            allocator: KeyAllocator::new(settings.max_key_attempts),
            settings,
        }
    }

    /// Shortens `target_url`.
    ///
    /// # Flow
    ///
    /// 1. Validate the URL (absolute, HTTP(S), host present)
    /// 2. Allocate the public key
    /// 3. Allocate the secret key, avoiding the public key as well
    /// 4. Insert the record
    ///
    /// Steps 2-4 are retried as a whole when the insert hits a unique index,
    /// which happens only when a concurrent request took the same key between
    /// the check and the insert.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if validation fails (nothing is persisted)
    /// - [`AppError::KeyExhaustion`] if no free key was found
    /// - [`AppError::ConstraintViolation`] if every insert retry collided
    pub async fn create(&self, target_url: &str) -> Result<UrlRecord, AppError> {
        let target = validate_target_url(target_url).map_err(|e| {
            AppError::invalid_url(
                "Your provided URL is not valid!",
                json!({ "target_url": target_url, "reason": e.to_string() }),
            )
        })?;
        let target = target.as_str();

        let strategy =
            FixedInterval::from_millis(INSERT_RETRY_DELAY_MS).take(self.settings.insert_retries);

        let record = RetryIf::spawn(
            strategy,
            move || self.allocate_and_insert(target),
            |e: &AppError| {
                let retry = e.is_constraint_violation();
                if retry {
                    warn!(error = %e, "Key taken concurrently, retrying creation");
                }
                retry
            },
        )
        .await?;

        info!(id = record.id, key = %record.key, "Short URL created");

        Ok(record)
    }

    /// Resolves a public key to its target URL.
    ///
    /// Only active records resolve. A successful lookup bumps the record's
    /// click counter; a failure to count is logged and does not affect the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] carrying the requested key if no active
    /// record matches. Keys with characters outside `A-Z0-9` are rejected
    /// without a lookup.
    pub async fn resolve(&self, key: &str) -> Result<String, AppError> {
        let not_found =
            || AppError::not_found(format!("URL '{}' doesn't exist!", key), json!({ "key": key }));

        // Nothing outside the key alphabet was ever issued.
        if !is_valid_key(key) {
            return Err(not_found());
        }

        let record = self
            .repository
            .find_active_by_key(key)
            .await?
            .ok_or_else(not_found)?;

        if let Err(e) = self.repository.record_click(record.id).await {
            warn!(id = record.id, error = %e, "Failed to record click");
        }

        debug!(key, target = %record.target_url, "Resolved short URL");

        Ok(record.target_url)
    }

    async fn allocate_and_insert(&self, target_url: &str) -> Result<UrlRecord, AppError> {
        let repository = &self.repository;

        let key = self
            .allocator
            .allocate(self.settings.key_length, move |candidate| async move {
                repository.key_in_use(&candidate).await
            })
            .await?;

        let public_key = key.as_str();
        let secret_key = self
            .allocator
            .allocate(self.settings.secret_key_length, move |candidate| async move {
                if candidate == public_key {
                    return Ok(true);
                }
                repository.key_in_use(&candidate).await
            })
            .await?;

        self.repository
            .insert(NewUrlRecord {
                key,
                secret_key,
                target_url: target_url.to_string(),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UrlStatus;
    use crate::domain::repositories::MockUrlRepository;
    use mockall::Sequence;

    fn record_from(new_record: NewUrlRecord, id: i64) -> UrlRecord {
        UrlRecord::new(
            id,
            new_record.key,
            new_record.secret_key,
            new_record.target_url,
            UrlStatus::Active,
            0,
        )
    }

    fn create_test_record(key: &str, url: &str) -> UrlRecord {
        UrlRecord::new(
            1,
            key.to_string(),
            "SECRET01".to_string(),
            url.to_string(),
            UrlStatus::Active,
            0,
        )
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_key_in_use()
            .times(2)
            .returning(|_| Ok(false));

        mock_repo
            .expect_insert()
            .withf(|new_record| {
                new_record.key.len() == 5
                    && new_record.secret_key.len() == 8
                    && new_record.target_url == "https://example.com/page"
            })
            .times(1)
            .returning(|new_record| Ok(record_from(new_record, 1)));

        let service = ShortenerService::new(Arc::new(mock_repo));

        let record = service.create("https://example.com/page").await.unwrap();

        assert_eq!(record.target_url, "https://example.com/page");
        assert_eq!(record.key.len(), 5);
        assert_eq!(record.secret_key.len(), 8);
        assert!(record.is_active());
        assert_eq!(record.clicks, 0);
    }

    #[tokio::test]
    async fn test_create_invalid_url_does_not_touch_store() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_key_in_use().times(0);
        mock_repo.expect_insert().times(0);

        let service = ShortenerService::new(Arc::new(mock_repo));

        let result = service.create("not-a-url").await;

        assert!(matches!(result, Err(AppError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_non_http_scheme() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_insert().times(0);

        let service = ShortenerService::new(Arc::new(mock_repo));

        let result = service.create("javascript:alert(1)").await;

        assert!(matches!(result, Err(AppError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_create_skips_taken_public_key() {
        let mut mock_repo = MockUrlRepository::new();
        let mut seq = Sequence::new();

        mock_repo
            .expect_key_in_use()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        mock_repo
            .expect_key_in_use()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));

        mock_repo
            .expect_insert()
            .times(1)
            .returning(|new_record| Ok(record_from(new_record, 1)));

        let service = ShortenerService::new(Arc::new(mock_repo));

        assert!(service.create("https://example.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_secret_never_equals_public_key() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_key_in_use().returning(|_| Ok(false));
        mock_repo
            .expect_insert()
            .withf(|new_record| new_record.key != new_record.secret_key)
            .times(1)
            .returning(|new_record| Ok(record_from(new_record, 1)));

        let settings = ShortenerSettings {
            key_length: 1,
            secret_key_length: 1,
            max_key_attempts: 500,
            insert_retries: 0,
        };
        let service = ShortenerService::with_settings(Arc::new(mock_repo), settings);

        let record = service.create("https://example.com").await.unwrap();

        assert_ne!(record.key, record.secret_key);
    }

    #[tokio::test]
    async fn test_create_key_exhaustion() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_key_in_use()
            .times(3)
            .returning(|_| Ok(true));
        mock_repo.expect_insert().times(0);

        let settings = ShortenerSettings {
            max_key_attempts: 3,
            ..ShortenerSettings::default()
        };
        let service = ShortenerService::with_settings(Arc::new(mock_repo), settings);

        let result = service.create("https://example.com").await;

        assert!(matches!(result, Err(AppError::KeyExhaustion { .. })));
    }

    #[tokio::test]
    async fn test_create_retries_after_constraint_violation() {
        let mut mock_repo = MockUrlRepository::new();
        let mut seq = Sequence::new();

        mock_repo.expect_key_in_use().returning(|_| Ok(false));

        mock_repo
            .expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(AppError::constraint_violation(
                    "Unique constraint violation",
                    json!({}),
                ))
            });
        mock_repo
            .expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_record| Ok(record_from(new_record, 2)));

        let service = ShortenerService::new(Arc::new(mock_repo));

        let record = service.create("https://example.com").await.unwrap();

        assert_eq!(record.id, 2);
    }

    #[tokio::test]
    async fn test_create_escalates_when_retries_exhausted() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_key_in_use().returning(|_| Ok(false));
        mock_repo
            .expect_insert()
            .times(DEFAULT_INSERT_RETRIES + 1)
            .returning(|_| {
                Err(AppError::constraint_violation(
                    "Unique constraint violation",
                    json!({}),
                ))
            });

        let service = ShortenerService::new(Arc::new(mock_repo));

        let result = service.create("https://example.com").await;

        assert!(matches!(result, Err(AppError::ConstraintViolation { .. })));
    }

    #[tokio::test]
    async fn test_create_does_not_retry_other_errors() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_key_in_use().returning(|_| Ok(false));
        mock_repo
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = ShortenerService::new(Arc::new(mock_repo));

        let result = service.create("https://example.com").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_resolve_active_record() {
        let mut mock_repo = MockUrlRepository::new();

        let record = create_test_record("ABCDE", "https://example.com/page");
        mock_repo
            .expect_find_active_by_key()
            .withf(|key| key == "ABCDE")
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));
        mock_repo
            .expect_record_click()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(()));

        let service = ShortenerService::new(Arc::new(mock_repo));

        let target = service.resolve("ABCDE").await.unwrap();

        assert_eq!(target, "https://example.com/page");
    }

    #[tokio::test]
    async fn test_resolve_not_found_carries_key() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_find_active_by_key()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_record_click().times(0);

        let service = ShortenerService::new(Arc::new(mock_repo));

        let err = service.resolve("ZZZZZ").await.unwrap_err();

        match err {
            AppError::NotFound { message, details } => {
                assert!(message.contains("ZZZZZ"));
                assert_eq!(details["key"], "ZZZZZ");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_rejects_foreign_characters_without_lookup() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_find_active_by_key().times(0);
        mock_repo.expect_record_click().times(0);

        let service = ShortenerService::new(Arc::new(mock_repo));

        for key in ["abcde", "AB-12", "favicon.ico"] {
            let err = service.resolve(key).await.unwrap_err();
            match err {
                AppError::NotFound { details, .. } => assert_eq!(details["key"], key),
                other => panic!("expected NotFound, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_resolve_ignores_click_failure() {
        let mut mock_repo = MockUrlRepository::new();

        let record = create_test_record("ABCDE", "https://example.com");
        mock_repo
            .expect_find_active_by_key()
            .returning(move |_| Ok(Some(record.clone())));
        mock_repo
            .expect_record_click()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = ShortenerService::new(Arc::new(mock_repo));

        assert_eq!(
            service.resolve("ABCDE").await.unwrap(),
            "https://example.com"
        );
    }
}
