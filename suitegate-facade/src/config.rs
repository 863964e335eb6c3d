//! Façade configuration.
//!
//! Everything that would otherwise be ambient (acting user, deployment
//! settings) is carried here and handed to the façade at construction.
//! It is read from the `[facade]` table of the gateway config file.

use serde::{Deserialize, Serialize};
use suitegate_model::DEFAULT_APPROVAL_THRESHOLD;

/// Records returned by a read without an id.
pub const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacadeConfig {
    /// Maximum records returned by a list read. No cursor is exposed.
    pub page_size: usize,
    /// Purchase orders with a total above this need an approver.
    pub approval_threshold: f64,
    /// Recorded on every audit log line.
    pub acting_user: String,
    /// Sender id used for approval notifications.
    pub notification_sender: String,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
            acting_user: "system".to_string(),
            notification_sender: "1".to_string(),
        }
    }
}
