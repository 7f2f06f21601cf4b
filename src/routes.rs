//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`        - Welcome message
//! - `GET  /about`   - About payload
//! - `GET  /health`  - Health check: database
//! - `POST /url`     - Create a short URL
//! - `GET  /{key}`   - Short link redirect
//!
//! Static routes take precedence over `/{key}`; keys only contain `A-Z0-9`,
//! so they never shadow `about`, `health` or `url`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{about_handler, health_handler, redirect_handler, root_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and the tracing layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/about", get(about_handler))
        .route("/health", get(health_handler))
        .route("/{key}", get(redirect_handler))
        .merge(api::routes::url_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] behind trailing-slash
/// normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
