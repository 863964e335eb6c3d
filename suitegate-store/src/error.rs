//! Error types for the store layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id exists (or it was deleted).
    #[error("record not found: {record_type} {id}")]
    NotFound { record_type: String, id: String },

    /// Network error talking to the record service.
    #[error("network error: {0}")]
    Network(String),

    /// Missing or refused credentials.
    #[error("authentication error: {0}")]
    Auth(String),

    /// The record service refused the operation.
    #[error("store rejected the request: {0}")]
    Rejected(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(record_type: &str, id: &str) -> Self {
        Self::NotFound {
            record_type: record_type.to_string(),
            id: id.to_string(),
        }
    }
}
