//! # API Error Types
//!
//! Error translation from the lower layers into HTTP responses.
//!
//! ## Status Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ValidationError                → 400 {success:false, message}          │
//! │  DbError::NotFound              → 404                                   │
//! │  DbError::InsufficientStock     → 400 (message names available qty)     │
//! │  DbError::UniqueViolation       → 400                                   │
//! │  MalformedDate (fatal contexts) → 400                                   │
//! │  Bad credentials                → 401 (one generic message)             │
//! │  Everything else                → 500 "Internal server error"           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed dates on *listing* routes never reach this type: those are
//! non-fatal by contract and surface as a `warning` field instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use dukaan_core::reporting::MalformedDate;
use dukaan_core::ValidationError;
use dukaan_db::DbError;

/// Errors a request handler can surface.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A form/JSON field failed validation or coercion.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A date field failed to parse where a date is mandatory
    /// (e.g. an expense's calendar date).
    #[error("{0}")]
    BadDate(#[from] MalformedDate),

    /// Login failed. One message for both unknown-user and wrong-password.
    #[error("Invalid username or password!")]
    InvalidCredentials,

    /// Storage layer error.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Password hashing failure (argon2).
    #[error("Internal server error")]
    Hashing,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadDate(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Db(DbError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Db(DbError::InsufficientStock { .. })
            | ApiError::Db(DbError::UniqueViolation { .. })
            | ApiError::Db(DbError::ForeignKeyViolation { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Db(_) | ApiError::Hashing => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal details stay in the log, not the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;
