use serde::{Deserialize, Serialize};

use crate::validation::{ApprovalDecision, validate_threshold};

/// Purchase orders above this total need a human approver.
pub const DEFAULT_APPROVAL_THRESHOLD: f64 = 5000.00;

/// Values of a purchase order's approval status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalStatus {
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalStatus::PendingApproval => "Pending Approval",
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Pending Approval" => Some(ApprovalStatus::PendingApproval),
            "Approved" => Some(ApprovalStatus::Approved),
            "Rejected" => Some(ApprovalStatus::Rejected),
            _ => None,
        }
    }
}

/// What the approval action did to a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalOutcome {
    /// Total within threshold; status set to Approved.
    AutoApproved,
    /// Total above threshold; status set to Pending Approval.
    RequiresApproval,
    /// Already approved; nothing written.
    Unchanged,
}

impl ApprovalOutcome {
    /// Status to write back, if any.
    pub fn next_status(self) -> Option<ApprovalStatus> {
        match self {
            ApprovalOutcome::AutoApproved => Some(ApprovalStatus::Approved),
            ApprovalOutcome::RequiresApproval => Some(ApprovalStatus::PendingApproval),
            ApprovalOutcome::Unchanged => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApprovalPolicy {
    pub threshold: f64,
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_APPROVAL_THRESHOLD,
        }
    }
}

impl ApprovalPolicy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Decide the outcome for a purchase order with `total` whose approval
    /// status field currently reads `current_status`.
    pub fn evaluate(&self, total: f64, current_status: Option<&str>) -> ApprovalOutcome {
        if current_status.and_then(ApprovalStatus::parse) == Some(ApprovalStatus::Approved) {
            return ApprovalOutcome::Unchanged;
        }
        match validate_threshold(total, self.threshold) {
            ApprovalDecision::AutoApprove => ApprovalOutcome::AutoApproved,
            ApprovalDecision::NeedsApproval => ApprovalOutcome::RequiresApproval,
        }
    }
}
