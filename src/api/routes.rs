//! API route configuration.

use crate::api::handlers::create_url_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// URL management routes.
///
/// # Endpoints
///
/// - `POST /url` - Shorten a target URL
pub fn url_routes() -> Router<AppState> {
    Router::new().route("/url", post(create_url_handler))
}
