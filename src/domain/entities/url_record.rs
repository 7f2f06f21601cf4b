//! URL record entity representing a shortened URL mapping.

/// Visibility state of a record.
///
/// Records start [`UrlStatus::Active`]. [`UrlStatus::Inactive`] is terminal:
/// the record no longer resolves, but its keys stay reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlStatus {
    Active,
    Inactive,
}

impl UrlStatus {
    pub fn from_flag(is_active: bool) -> Self {
        if is_active { Self::Active } else { Self::Inactive }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

/// A shortened URL with its public and secret keys.
///
/// `key` is handed out to end users; `secret_key` identifies the record for
/// management and is returned only once, at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub key: String,
    pub secret_key: String,
    pub target_url: String,
    pub status: UrlStatus,
    pub clicks: i64,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        key: String,
        secret_key: String,
        target_url: String,
        status: UrlStatus,
        clicks: i64,
    ) -> Self {
        Self {
            id,
            key,
            secret_key,
            target_url,
            status,
            clicks,
        }
    }

    /// Returns true if the record can be resolved publicly.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Input data for inserting a new record.
///
/// The store fills in `id`, sets the record active and starts `clicks` at 0.
#[derive(Debug, Clone)]
pub struct NewUrlRecord {
    pub key: String,
    pub secret_key: String,
    pub target_url: String,
}
