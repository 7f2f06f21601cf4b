//! # Keyed URL Shortener
//!
//! A small URL shortening service built with Axum and SQLite. Every
//! shortened URL gets two identifiers:
//!
//! - a short public **key** (5 characters by default) used in redirect links
//! - an unguessable **secret key** (8 characters by default) identifying the
//!   record for management, returned only once at creation time
//!
//! Both are drawn from `A-Z0-9` with a CSPRNG and are unique across all
//! records, active or not.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The URL record entity and repository trait
//! - **Application Layer** ([`application`]) - Key allocation, creation and resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="http://localhost:8000"
//! export DATABASE_URL="sqlite://./urlshortener.db?mode=rwc"
//!
//! cargo run
//!
//! curl -X POST localhost:8000/url -H 'content-type: application/json' \
//!      -d '{"target_url": "https://example.com/page"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;
