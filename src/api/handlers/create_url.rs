//! Handler for the URL creation endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use validator::Validate;

use crate::api::dto::url::{CreateUrlRequest, UrlInfoResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a target URL.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// { "target_url": "https://example.com/page" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "target_url": "https://example.com/page",
///   "is_active": true,
///   "clicks": 0,
///   "url": "K7Q2M",
///   "admin_url": "X9D0PL3A",
///   "short_url": "http://localhost:8000/K7Q2M"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed or the URL is invalid.
/// Returns 500 if no unique key could be allocated.
pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UrlInfoResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let record = state.shortener.create(&payload.target_url).await?;
    let short_url = state.short_url(&record.key);

    Ok((
        StatusCode::CREATED,
        Json(UrlInfoResponse::from_record(record, short_url)),
    ))
}
