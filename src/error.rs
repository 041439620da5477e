//! Application error type and its HTTP mapping.
//!
//! Store-level driver errors are translated into [`AppError`] at the repository
//! boundary. The resolver only inspects [`AppError::NotFound`] and
//! [`AppError::AlreadyExists`]; everything else is passed through untouched.

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

/// Serializable error payload returned in every error response.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input (URL shape, request body).
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Lookup or increment target does not exist.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Uniqueness violation reported by the store.
    #[error("{message}")]
    AlreadyExists { message: String, details: Value },

    /// The resolver gave up after repeated code collisions.
    #[error("{message}")]
    LinkExists { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
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

    pub fn already_exists(message: impl Into<String>, details: Value) -> Self {
        Self::AlreadyExists {
            message: message.into(),
            details,
        }
    }

    pub fn link_exists(message: impl Into<String>, details: Value) -> Self {
        Self::LinkExists {
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

    /// HTTP status for this error.
    ///
    /// Only `NotFound` and `Validation` are client errors; collisions and
    /// exhausted retries are server-side failures.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::AlreadyExists { .. }
            | AppError::LinkExists { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::AlreadyExists { .. } => "already_exists",
            AppError::LinkExists { .. } => "link_exists",
            AppError::Internal { .. } => "internal_error",
        }
    }

    /// Converts the error into its response payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::AlreadyExists { message, details }
            | AppError::LinkExists { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = e {
            return AppError::not_found("Link not found", json!({}));
        }

        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::already_exists(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Validation failed", json!({ "fields": e.to_string() }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
    }
}
