use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FacadeError;

/// The uniform response shape: `{ success, message?, id?, data? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    /// A successful read.
    pub fn data(data: Value) -> Self {
        Self {
            success: true,
            message: None,
            id: None,
            data: Some(data),
        }
    }

    /// A successful mutation of record `id`.
    pub fn done(message: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            id: Some(id.into()),
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            id: None,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<FacadeError> for Envelope {
    fn from(err: FacadeError) -> Self {
        Envelope::failure(err.to_string())
    }
}
