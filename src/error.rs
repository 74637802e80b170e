//! Error types for the cache server
//!
//! Unified error handling using thiserror. A cache miss is not an error at
//! the engine level (operations return `Option`/`bool`); `NotFound` exists so
//! the HTTP layer can surface a miss as a 404.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key absent or expired (HTTP surface only)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or mismatched API key
    #[error("Unauthorized")]
    Unauthorized,

    /// Snapshot operation invoked with no path configured
    #[error("No snapshot path configured")]
    NoSnapshotPath,

    /// Read/write failure against snapshot storage
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot content is malformed
    #[error("Snapshot decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Unauthorized => StatusCode::UNAUTHORIZED,
            CacheError::NoSnapshotPath => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
