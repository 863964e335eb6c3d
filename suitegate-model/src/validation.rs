//! Field-level validators shared by every entity type.
//!
//! All functions here are pure; they run before any store mutation and a
//! failure prevents the store call entirely.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::entity::Fields;

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A write payload was rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent, null or blank.
    #[error("{field} is required and cannot be empty")]
    MissingField { field: String },

    /// A field is present but not in the expected shape.
    #[error("invalid {field}: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A numeric field is outside its allowed range.
    #[error("{field} {reason}")]
    OutOfRange { field: String, reason: String },
}

impl ValidationError {
    pub fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn out_of_range(field: &str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field }
            | Self::InvalidFormat { field, .. }
            | Self::OutOfRange { field, .. } => field,
        }
    }
}

/// Whether a payload value counts as supplied. `null` and whitespace-only
/// strings do not.
pub fn has_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Read a finite number from a JSON value, accepting numeric strings.
/// `NaN`, `inf` and out-of-range literals such as `1e400` are rejected.
pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Check that every named field is present and non-blank.
///
/// Fields are checked in the order given and the first failure is reported.
pub fn validate_required(required: &[&str], payload: &Fields) -> ValidationResult<()> {
    match required.iter().find(|name| !has_value(payload.get(**name))) {
        Some(name) => Err(ValidationError::missing(name)),
        None => Ok(()),
    }
}

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX is a valid regex literal")
});

/// `local-part@domain` with no whitespace anywhere and at least one dot in
/// the domain.
pub fn validate_email_format(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Outcome of comparing an amount against an approval threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalDecision {
    AutoApprove,
    NeedsApproval,
}

/// The threshold is inclusive: `total <= threshold` auto-approves.
pub fn validate_threshold(total: f64, threshold: f64) -> ApprovalDecision {
    if total <= threshold {
        ApprovalDecision::AutoApprove
    } else {
        ApprovalDecision::NeedsApproval
    }
}
