//! DTOs for the URL creation endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlRecord;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// The URL to shorten (absolute HTTP/HTTPS).
    #[validate(url(message = "Your provided URL is not valid!"))]
    pub target_url: String,
}

/// A freshly created short URL.
///
/// `url` is the public key and `admin_url` the secret key. This is the only
/// response that ever carries the secret key.
#[derive(Debug, Serialize)]
pub struct UrlInfoResponse {
    pub target_url: String,
    pub is_active: bool,
    pub clicks: i64,
    pub url: String,
    pub admin_url: String,
    /// Full public link composed from the configured base URL.
    pub short_url: String,
}

impl UrlInfoResponse {
    pub fn from_record(record: UrlRecord, short_url: String) -> Self {
        Self {
            is_active: record.is_active(),
            target_url: record.target_url,
            clicks: record.clicks,
            url: record.key,
            admin_url: record.secret_key,
            short_url,
        }
    }
}
