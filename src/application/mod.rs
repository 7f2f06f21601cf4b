//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations HTTP handlers
//! and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Key issuance and resolution
//! - [`services::key_allocator::KeyAllocator`] - Bounded unique key allocation

pub mod services;
