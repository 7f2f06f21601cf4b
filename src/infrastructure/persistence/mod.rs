//! SQLite persistence.
//!
//! Concrete implementations of domain repository traits using SQLx, plus
//! pool construction and embedded migrations.
//!
//! # Modules
//!
//! - [`pool`] - Pool setup and migrations
//! - [`SqliteUrlRepository`] - URL record storage and retrieval

pub mod pool;
pub mod sqlite_url_repository;

pub use sqlite_url_repository::SqliteUrlRepository;
