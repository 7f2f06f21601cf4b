//! Domain layer: the URL record entity and the storage contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on infrastructure or presentation
//! layers. Key issuance and resolution live in
//! [`crate::application::services`].

pub mod entities;
pub mod repositories;
