use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::storage::StorageError;

/// A lightweight wrapper for handler errors that keeps the message local.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// Shortcut for a 400 Bad Request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "status": self.status.as_u16()
        }));

        (self.status, body).into_response()
    }
}

/// Map the storage error taxonomy onto HTTP status codes. I/O details stay
/// in the server log; clients get a generic message without host paths.
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        use StorageError::*;
        let status = match &err {
            InvalidBucketName { .. } | InvalidObjectKey { .. } => StatusCode::BAD_REQUEST,
            PathTraversal(_) => {
                tracing::warn!("rejected unsafe path: {}", err);
                StatusCode::BAD_REQUEST
            }
            BucketNotFound(_) | ObjectNotFound { .. } => StatusCode::NOT_FOUND,
            BucketAlreadyExists(_) | BucketNotEmpty(_) => StatusCode::CONFLICT,
            FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Io(inner) => {
                tracing::error!("storage I/O failure: {}", inner);
                return AppError::internal("internal storage error");
            }
        };
        AppError::new(status, err.to_string())
    }
}
