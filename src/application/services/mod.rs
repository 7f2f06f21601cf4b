//! Business logic services for the application layer.

pub mod key_allocator;
pub mod shortener_service;

pub use key_allocator::KeyAllocator;
pub use shortener_service::{ShortenerService, ShortenerSettings};
