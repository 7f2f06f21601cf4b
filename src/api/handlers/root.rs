//! Handlers for the service root and about page.

use axum::Json;
use serde_json::{Value, json};

/// Greets API clients.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> &'static str {
    "Welcome to the URL shortener API!"
}

/// Static about payload.
///
/// # Endpoint
///
/// `GET /about`
pub async fn about_handler() -> Json<Value> {
    Json(json!({ "Data": "About" }))
}
