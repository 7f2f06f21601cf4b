//! Bounded generate-and-check allocation of unique keys.

use std::future::Future;

use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::utils::key_generator::generate_key;

/// Default number of candidates tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Allocates keys that are not yet in use.
///
/// Each attempt draws a fresh candidate and asks the caller-supplied
/// predicate whether it is taken. The predicate decides which namespace is
/// checked; it must cover inactive records as well, since an issued key is
/// never handed out again.
#[derive(Debug, Clone, Copy)]
pub struct KeyAllocator {
    max_attempts: usize,
}

impl KeyAllocator {
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    /// Returns the first generated candidate for which `is_taken` yields `false`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::KeyExhaustion`] after `max_attempts` collisions.
    /// Errors from `is_taken` are propagated unchanged.
    pub async fn allocate<F, Fut>(&self, length: usize, mut is_taken: F) -> Result<String, AppError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<bool, AppError>>,
    {
        for attempt in 1..=self.max_attempts {
            let candidate = generate_key(length);

            if !is_taken(candidate.clone()).await? {
                return Ok(candidate);
            }

            debug!(attempt, length, "Key collision, drawing a new candidate");
        }

        Err(AppError::key_exhaustion(
            "Failed to allocate a unique key",
            json!({ "length": length, "attempts": self.max_attempts }),
        ))
    }
}

impl Default for KeyAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_allocate_first_free_candidate() {
        let allocator = KeyAllocator::default();

        let key = allocator.allocate(5, |_| async { Ok(false) }).await.unwrap();

        assert_eq!(key.len(), 5);
        assert!(
            key.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[tokio::test]
    async fn test_allocate_retries_on_collision() {
        let allocator = KeyAllocator::new(5);
        let calls = AtomicUsize::new(0);

        let key = allocator
            .allocate(8, |_| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok(n < 2) }
            })
            .await
            .unwrap();

        assert_eq!(key.len(), 8);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_allocate_exhaustion() {
        let allocator = KeyAllocator::new(4);
        let calls = AtomicUsize::new(0);

        let result = allocator
            .allocate(5, |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(true) }
            })
            .await;

        assert!(matches!(result, Err(AppError::KeyExhaustion { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_allocate_propagates_check_error() {
        let allocator = KeyAllocator::default();

        let result = allocator
            .allocate(5, |_| async {
                Err(AppError::internal("Database error", json!({})))
            })
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_allocate_passes_candidate_to_check() {
        let allocator = KeyAllocator::default();
        let seen = std::sync::Mutex::new(Vec::new());

        let key = allocator
            .allocate(6, |candidate| {
                seen.lock().unwrap().push(candidate);
                async { Ok(false) }
            })
            .await
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![key]);
    }
}
