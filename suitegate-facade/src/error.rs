//! Error types for the façade.

use crate::request::Operation;
use suitegate_model::{EntityType, ValidationError};
use suitegate_store::StoreError;
use thiserror::Error;

/// Result type for façade operations.
pub type FacadeResult<T> = Result<T, FacadeError>;

/// Every way a façade call can fail. All of them end up as a
/// `{success: false, message}` envelope at the boundary.
#[derive(Debug, Error)]
pub enum FacadeError {
    /// Request carried no entity tag.
    #[error("Entity type is required. Use {}.", quoted_list(.supported))]
    MissingEntityType { supported: Vec<&'static str> },

    /// Request carried a tag outside the supported set.
    #[error("Unsupported entity type \"{tag}\". Use {}.", quoted_list(.supported))]
    UnsupportedEntityType {
        tag: String,
        supported: Vec<&'static str>,
    },

    /// The entity type exists but does not offer this operation.
    #[error("{} records are read-only; {operation} is not supported.", .entity.label())]
    UnsupportedOperation {
        entity: EntityType,
        operation: Operation,
    },

    /// Update or delete without an id.
    #[error("Entity ID is required for {operation} operations.")]
    MissingId { operation: Operation },

    /// Payload rejected before reaching the store.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The id does not resolve in the store.
    #[error("{} not found: {id}", .entity.label())]
    NotFound { entity: EntityType, id: String },

    /// Approval notification could not be sent.
    #[error("notification failed: {0}")]
    Notification(String),

    /// The record store itself failed.
    #[error("record store error: {0}")]
    Store(StoreError),
}

impl FacadeError {
    /// Translate a store failure for `entity`, lifting `NotFound` into the
    /// façade's own variant.
    pub fn from_store(entity: EntityType, err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id, .. } => FacadeError::NotFound { entity, id },
            other => FacadeError::Store(other),
        }
    }

    /// Stable short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FacadeError::MissingEntityType { .. } => "missing_entity_type",
            FacadeError::UnsupportedEntityType { .. } => "unsupported_entity_type",
            FacadeError::UnsupportedOperation { .. } => "unsupported_operation",
            FacadeError::MissingId { .. } => "missing_id",
            FacadeError::Validation(_) => "validation_error",
            FacadeError::NotFound { .. } => "not_found",
            FacadeError::Notification(_) => "notification_error",
            FacadeError::Store(_) => "store_error",
        }
    }

    /// Whether the caller can fix this by changing the request.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, FacadeError::Store(_) | FacadeError::Notification(_))
    }
}

fn quoted_list(tags: &[&str]) -> String {
    let quoted: Vec<String> = tags.iter().map(|t| format!("\"{t}\"")).collect();
    match quoted.split_last() {
        None => String::new(),
        Some((only, [])) => only.clone(),
        Some((last, rest)) => format!("{}, or {}", rest.join(", "), last),
    }
}
