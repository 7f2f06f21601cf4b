//! Core domain entities.
//!
//! - [`UrlRecord`] - A persisted short-key mapping
//! - [`NewUrlRecord`] - Input for creating a record
//! - [`UrlStatus`] - Active / inactive state of a record

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord, UrlStatus};
