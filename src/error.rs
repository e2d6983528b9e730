//! Defines the app level error type, how store failures are classified into it, and how each
//! kind is rendered as a JSON error response.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::ErrorCode;
use serde::{Deserialize, Serialize};

/// The errors that may occur in the application.
///
/// Every failure surfaced to a client is exactly one of these kinds. The message of each kind is
/// safe to show to the client; details about store failures are only ever logged.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// The requested category (or any category, for listing) does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The store is unreachable or misbehaving, e.g., the database file cannot be opened, is
    /// locked, or is corrupt.
    #[error("Database connection failure")]
    DataAccessFailure,

    /// Any other failure that occurred while talking to the store.
    #[error("Unexpected error occurred")]
    UnexpectedFailure,

    /// The request was rejected before reaching the service, e.g., a malformed path parameter or
    /// an invalid body.
    #[error("{0}")]
    ValidationFailure(String),
}

impl Error {
    /// The HTTP status code that corresponds to this kind of error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::DataAccessFailure | Error::UnexpectedFailure => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::ValidationFailure(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Shorthand for a [Error::ValidationFailure] with the standard "Validation failed" prefix.
    pub fn validation(reason: impl std::fmt::Display) -> Self {
        Error::ValidationFailure(format!("Validation failed: {reason}"))
    }
}

/// Classify a failure reported by the store.
///
/// Failures that indicate the database itself is unreachable or broken become
/// [Error::DataAccessFailure], everything else becomes [Error::UnexpectedFailure].
/// `context` describes what was being attempted and is only used for logging.
pub fn classify_store_error(error: rusqlite::Error, context: &str) -> Error {
    if is_resource_failure(&error) {
        tracing::error!(%error, "Database connection failure while {context}");
        Error::DataAccessFailure
    } else {
        tracing::error!(%error, "An unexpected error occurred while {context}");
        Error::UnexpectedFailure
    }
}

fn is_resource_failure(error: &rusqlite::Error) -> bool {
    match error {
        rusqlite::Error::SqliteFailure(sql_error, _) => matches!(
            sql_error.code,
            ErrorCode::CannotOpen
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::SystemIoFailure
                | ErrorCode::DiskFull
                | ErrorCode::DatabaseCorrupt
                | ErrorCode::NotADatabase
                | ErrorCode::ReadOnly
                | ErrorCode::OutOfMemory
                | ErrorCode::PermissionDenied
                | ErrorCode::FileLockingProtocolFailed
        ),
        rusqlite::Error::InvalidPath(_) => true,
        _ => false,
    }
}

/// The JSON body sent to the client for every error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Mirrors the HTTP status code of the response.
    pub status: u16,
    /// A human readable description of what went wrong.
    pub message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            status: status.as_u16(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("rejected request body: {rejection}");
        Error::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("rejected query string: {rejection}");
        Error::validation(rejection.body_text())
    }
}
