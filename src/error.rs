//! Application error type and its HTTP representation.
//!
//! Every failure in the service ends up as one of the [`AppError`] kinds.
//! Handlers return `Result<_, AppError>` and rely on [`IntoResponse`] to render
//! a uniform JSON body:
//!
//! ```json
//! {
//!   "error": {
//!     "code": "not_found",
//!     "message": "URL 'http://localhost:8000/ZZZZZ' doesn't exist!",
//!     "details": { "key": "ZZZZZ" }
//!   }
//! }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Target URL failed validation. Client error, never retried.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// No active record for the requested key.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Unique index rejected an insert.
    ///
    /// Retried locally by the shortener; a server error once retries run out.
    #[error("{message}")]
    ConstraintViolation { message: String, details: Value },

    /// The key allocator ran out of attempts.
    #[error("{message}")]
    KeyExhaustion { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn constraint_violation(message: impl Into<String>, details: Value) -> Self {
        Self::ConstraintViolation {
            message: message.into(),
            details,
        }
    }
    pub fn key_exhaustion(message: impl Into<String>, details: Value) -> Self {
        Self::KeyExhaustion {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }

    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidUrl { .. } => (StatusCode::BAD_REQUEST, "invalid_url"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::ConstraintViolation { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "constraint_violation")
            }
            AppError::KeyExhaustion { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "key_exhaustion"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.status_and_code();
        let (message, details) = match self {
            AppError::InvalidUrl { message, details }
            | AppError::NotFound { message, details }
            | AppError::ConstraintViolation { message, details }
            | AppError::KeyExhaustion { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::constraint_violation(
            "Unique constraint violation",
            json!({ "constraint": db.constraint(), "reason": db.message() }),
        );
    }

    tracing::error!("Database error: {}", e);
    AppError::internal("Database error", json!({}))
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::invalid_url(
            "Your provided URL is not valid!",
            json!({ "fields": errors.field_errors().keys().collect::<Vec<_>>() }),
        )
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_url(
            "Request body must be a JSON object with a 'target_url' field",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
