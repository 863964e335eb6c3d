//! Purchase-order approval action.
//!
//! Loads a purchase order, decides auto-approval against the configured
//! threshold, writes the new approval status and notifies the next approver
//! when a manual decision is needed.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use suitegate_model::{
    ApprovalOutcome, ApprovalPolicy, ApprovalStatus, EntityDescriptor, EntityType, Fields,
    as_number, has_value,
};
use suitegate_store::RecordStore;
use tracing::{info, warn};

use crate::config::FacadeConfig;
use crate::envelope::Envelope;
use crate::error::{FacadeError, FacadeResult};
use crate::request::Operation;

const TOTAL_FIELD: &str = "total";
const STATUS_FIELD: &str = "approvalstatus";
const APPROVER_FIELD: &str = "nextapprover";

pub const NOTICE_SUBJECT: &str = "Purchase Order Approval Required";

/// A message asking an approver to review a purchase order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovalNotice {
    pub sender: String,
    pub recipient: String,
    pub purchase_order_id: String,
    pub subject: String,
    pub body: String,
}

impl ApprovalNotice {
    pub fn new(sender: &str, recipient: &str, purchase_order_id: &str, total: f64) -> Self {
        Self {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            purchase_order_id: purchase_order_id.to_string(),
            subject: NOTICE_SUBJECT.to_string(),
            body: format!(
                "A purchase order with ID {purchase_order_id} and total ${total:.2} requires your approval."
            ),
        }
    }
}

/// Delivery channel for approval notices.
#[async_trait]
pub trait ApprovalNotifier: Send + Sync {
    async fn notify(&self, notice: &ApprovalNotice) -> FacadeResult<()>;
}

/// Writes notices to the log. Used when no mail relay is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl ApprovalNotifier for LogNotifier {
    async fn notify(&self, notice: &ApprovalNotice) -> FacadeResult<()> {
        info!(
            sender = %notice.sender,
            recipient = %notice.recipient,
            purchase_order = %notice.purchase_order_id,
            subject = %notice.subject,
            "{}",
            notice.body
        );
        Ok(())
    }
}

/// What the approval action did to one purchase order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovalReport {
    pub id: String,
    pub total: f64,
    pub outcome: ApprovalOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notified: Option<String>,
}

impl ApprovalReport {
    pub fn message(&self) -> &'static str {
        match self.outcome {
            ApprovalOutcome::AutoApproved => "Purchase Order auto-approved",
            ApprovalOutcome::RequiresApproval => "Purchase Order pending approval",
            ApprovalOutcome::Unchanged => "Purchase Order already approved",
        }
    }
}

pub struct ApprovalWorkflow {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn ApprovalNotifier>,
    policy: ApprovalPolicy,
    sender: String,
}

impl ApprovalWorkflow {
    pub fn new(
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn ApprovalNotifier>,
        config: &FacadeConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            policy: ApprovalPolicy::new(config.approval_threshold),
            sender: config.notification_sender.clone(),
        }
    }

    pub fn policy(&self) -> ApprovalPolicy {
        self.policy
    }

    /// Run the approval action for purchase order `id`.
    pub async fn run(&self, id: &str) -> FacadeResult<ApprovalReport> {
        let entity = EntityType::PurchaseOrder;
        let record_type = EntityDescriptor::for_type(entity).record_type;
        let id = id.trim();
        if id.is_empty() {
            return Err(FacadeError::MissingId {
                operation: Operation::Update,
            });
        }

        let row = self
            .store
            .get(record_type, id)
            .await
            .map_err(|e| FacadeError::from_store(entity, e))?;

        let total = row.fields.get(TOTAL_FIELD).and_then(as_number).unwrap_or(0.0);
        let current = row.fields.get(STATUS_FIELD).and_then(Value::as_str);
        let outcome = self.policy.evaluate(total, current);

        let mut report = ApprovalReport {
            id: row.id.clone(),
            total,
            outcome,
            status: None,
            notified: None,
        };

        let Some(status) = outcome.next_status() else {
            info!(purchase_order = %id, "Purchase order already approved; nothing to do");
            return Ok(report);
        };

        let mut fields = Fields::new();
        fields.insert(STATUS_FIELD.to_string(), Value::String(status.as_str().to_string()));
        self.store
            .update(record_type, id, fields)
            .await
            .map_err(|e| FacadeError::from_store(entity, e))?;
        report.status = Some(status.as_str().to_string());
        info!(purchase_order = %id, total, status = status.as_str(), "Approval status set");

        if status == ApprovalStatus::PendingApproval {
            match Self::approver(&row.fields) {
                Some(approver) => {
                    let notice = ApprovalNotice::new(&self.sender, &approver, id, total);
                    self.notifier.notify(&notice).await?;
                    report.notified = Some(approver);
                }
                None => {
                    warn!(purchase_order = %id, "No next approver set for purchase order");
                }
            }
        }

        Ok(report)
    }

    /// Run the action and fold the outcome into an envelope.
    pub async fn handle(&self, id: &str) -> Envelope {
        match self.run(id).await {
            Ok(report) => {
                let data = serde_json::to_value(&report).unwrap_or(Value::Null);
                Envelope::done(report.message(), report.id.clone()).with_data(data)
            }
            Err(err) => {
                warn!(purchase_order = %id, kind = err.kind(), "Approval failed: {}", err);
                Envelope::from(err)
            }
        }
    }

    fn approver(fields: &Fields) -> Option<String> {
        let value = fields.get(APPROVER_FIELD).filter(|v| has_value(Some(*v)))?;
        match value {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
