//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a public key to its target URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// # Errors
///
/// Returns 404 Not Found, naming the requested short URL, if no active
/// record has this key. Deactivated records are reported the same way.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let target_url = state
        .shortener
        .resolve(&key)
        .await
        .map_err(|e| match e {
            AppError::NotFound { details, .. } => AppError::not_found(
                format!("URL '{}' doesn't exist!", state.short_url(&key)),
                details,
            ),
            other => other,
        })?;

    Ok(Redirect::temporary(&target_url))
}
