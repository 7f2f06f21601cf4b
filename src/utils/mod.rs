//! Utility functions for key generation and URL validation.
//!
//! - [`key_generator`] - Random key generation over `A-Z0-9`
//! - [`url_validator`] - Absolute HTTP(S) URL validation

pub mod key_generator;
pub mod url_validator;
