//! Random key generation.
//!
//! Keys are drawn from uppercase ASCII letters and digits using the
//! thread-local CSPRNG (`rand::rng()`, ChaCha seeded from the OS). Every
//! position is sampled uniformly and independently.

use rand::Rng;

/// The 36 symbols keys are built from.
pub const KEY_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default length of a public key.
pub const DEFAULT_KEY_LENGTH: usize = 5;

/// Default length of a secret key.
pub const DEFAULT_SECRET_KEY_LENGTH: usize = 8;

/// Generates a random key of exactly `length` characters.
///
/// A `length` of zero yields an empty string; configuration validation keeps
/// zero-length keys out of the service.
///
/// # Examples
///
/// ```ignore
/// let key = generate_key(5);
/// assert_eq!(key.len(), 5);
/// assert!(key.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
/// ```
pub fn generate_key(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| KEY_ALPHABET[rng.random_range(0..KEY_ALPHABET.len())] as char)
        .collect()
}

/// Returns true if every character of `key` belongs to [`KEY_ALPHABET`].
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| KEY_ALPHABET.contains(&b))
}
