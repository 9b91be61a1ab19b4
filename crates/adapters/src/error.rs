//! Adapter error types.
//!
//! These errors exist for the fallible internals of each adapter. At the
//! adapter boundary they are absorbed into a failed [`crate::AdapterOutcome`]
//! plus an ERROR log entry; they never cross into the executor.

use thiserror::Error;

/// Errors that can occur inside an adapter call.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Document store error.
    #[error("Document store error: {0}")]
    Document(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Operation is not supported by the adapter.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl From<reqwest::Error> for AdapterError {
    fn from(e: reqwest::Error) -> Self {
        AdapterError::Http(e.to_string())
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(e: serde_json::Error) -> Self {
        AdapterError::Json(e.to_string())
    }
}
