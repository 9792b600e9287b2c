use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::error::Error;
use std::fmt;

use crate::store::StoreError;

/// The primary error type for the application.
///
/// Every handler returns `AppResult<T>`; the variant decides the HTTP status and the
/// `message` carried in the JSON error payload.
#[derive(Debug)]
pub enum AppError {
    /// Unexpected failures. The client only sees a generic message and an error id.
    Internal(anyhow::Error),
    /// Malformed or inconsistent request body. Path and query problems use `InvalidInput`.
    BadRequest(String),
    /// A requested record (or any record matching a filter) is absent.
    NotFound(String),
    /// A query or path parameter that cannot be honoured (bad id, query string or sort field).
    InvalidInput(String),
    /// A single payload field failed validation.
    ValidationError {
        field: String,
        message: String,
    },
    /// The store rejected a write because of a constraint.
    Database(String),
    /// A write lost a race with another writer and the record still exists.
    Concurrency(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::ValidationError { field, message } => {
                write!(f, "Validation error on field '{}': {}", field, message)
            }
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Concurrency(msg) => write!(f, "Concurrency error: {}", msg),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Internal(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, message, error_id) = match self {
            AppError::Internal(e) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!(%error_id, "Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                    Some(error_id),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg, None),
            AppError::ValidationError { field, message } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Validation failed for field '{}': {}", field, message),
                None,
            ),
            AppError::Database(msg) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!(%error_id, "Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error occurred".to_string(),
                    Some(error_id),
                )
            }
            AppError::Concurrency(msg) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::warn!(%error_id, "Concurrency error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONCURRENCY_ERROR",
                    "Concurrency error occurred".to_string(),
                    Some(error_id),
                )
            }
        };

        let mut body = json!({
            "message": message,
            "code": error_code,
            "status": status.as_u16(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        if let Some(error_id) = error_id {
            body["error_id"] = json!(error_id.to_string());
        }

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Constraint(msg) => AppError::Database(msg),
            StoreError::Conflict(id) => {
                AppError::Concurrency(format!("book {} was modified concurrently", id))
            }
            StoreError::Other(e) => AppError::Internal(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid book data: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

/// A type alias for `Result<T, AppError>`, used throughout the application.
pub type AppResult<T> = Result<T, AppError>;

/// Payload validation helpers.
pub mod validation {
    use super::*;

    /// Rejects empty or whitespace-only text fields.
    pub fn require_text(value: &str, field: &str) -> AppResult<()> {
        if value.trim().is_empty() {
            return Err(AppError::ValidationError {
                field: field.to_string(),
                message: "must not be blank".to_string(),
            });
        }
        if value.contains('\0') {
            return Err(AppError::ValidationError {
                field: field.to_string(),
                message: "contains null characters".to_string(),
            });
        }
        Ok(())
    }
}
