//! Tests for the purchase-order approval action.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use suitegate_facade::{
    ApprovalNotice, ApprovalNotifier, ApprovalWorkflow, FacadeConfig, FacadeError, FacadeResult,
    NOTICE_SUBJECT,
};
use suitegate_model::{ApprovalOutcome, Fields};
use suitegate_store::{MemoryStore, RecordStore};
use tokio::sync::Mutex;

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<ApprovalNotice>>,
}

#[async_trait]
impl ApprovalNotifier for RecordingNotifier {
    async fn notify(&self, notice: &ApprovalNotice) -> FacadeResult<()> {
        self.sent.lock().await.push(notice.clone());
        Ok(())
    }
}

struct FailingNotifier;

#[async_trait]
impl ApprovalNotifier for FailingNotifier {
    async fn notify(&self, _notice: &ApprovalNotice) -> FacadeResult<()> {
        Err(FacadeError::Notification("mail relay unavailable".into()))
    }
}

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

async fn setup(
    po: Value,
) -> (ApprovalWorkflow, Arc<MemoryStore>, Arc<RecordingNotifier>, String) {
    let store = Arc::new(MemoryStore::new());
    let id = store.create("purchaseorder", fields(po)).await.unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let workflow = ApprovalWorkflow::new(store.clone(), notifier.clone(), &FacadeConfig::default());
    (workflow, store, notifier, id)
}

async fn status_of(store: &MemoryStore, id: &str) -> Option<String> {
    store
        .get("purchaseorder", id)
        .await
        .unwrap()
        .fields
        .get("approvalstatus")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[tokio::test]
async fn total_below_threshold_is_auto_approved() {
    let (workflow, store, notifier, id) = setup(json!({"total": 4999.99, "nextapprover": "7"})).await;

    let report = workflow.run(&id).await.unwrap();
    assert_eq!(report.outcome, ApprovalOutcome::AutoApproved);
    assert_eq!(report.status.as_deref(), Some("Approved"));
    assert_eq!(status_of(&store, &id).await.as_deref(), Some("Approved"));
    assert!(notifier.sent.lock().await.is_empty());
}

#[tokio::test]
async fn total_at_threshold_is_auto_approved() {
    let (workflow, store, _, id) = setup(json!({"total": 5000.00})).await;

    let report = workflow.run(&id).await.unwrap();
    assert_eq!(report.outcome, ApprovalOutcome::AutoApproved);
    assert_eq!(status_of(&store, &id).await.as_deref(), Some("Approved"));
}

#[tokio::test]
async fn total_above_threshold_notifies_next_approver() {
    let (workflow, store, notifier, id) =
        setup(json!({"total": "5000.01", "nextapprover": "42"})).await;

    let report = workflow.run(&id).await.unwrap();
    assert_eq!(report.outcome, ApprovalOutcome::RequiresApproval);
    assert_eq!(report.notified.as_deref(), Some("42"));
    assert_eq!(status_of(&store, &id).await.as_deref(), Some("Pending Approval"));

    let sent = notifier.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0],
        ApprovalNotice {
            sender: "1".into(),
            recipient: "42".into(),
            purchase_order_id: id.clone(),
            subject: NOTICE_SUBJECT.into(),
            body: format!(
                "A purchase order with ID {id} and total $5000.01 requires your approval."
            ),
        }
    );
}

#[tokio::test]
async fn pending_without_approver_still_sets_status() {
    let (workflow, store, notifier, id) = setup(json!({"total": 12000})).await;

    let report = workflow.run(&id).await.unwrap();
    assert_eq!(report.outcome, ApprovalOutcome::RequiresApproval);
    assert_eq!(report.notified, None);
    assert_eq!(status_of(&store, &id).await.as_deref(), Some("Pending Approval"));
    assert!(notifier.sent.lock().await.is_empty());
}

#[tokio::test]
async fn already_approved_is_left_alone() {
    let (workflow, store, notifier, id) =
        setup(json!({"total": 99999, "approvalstatus": "Approved", "nextapprover": "42"})).await;

    let report = workflow.run(&id).await.unwrap();
    assert_eq!(report.outcome, ApprovalOutcome::Unchanged);
    assert_eq!(report.status, None);
    assert_eq!(status_of(&store, &id).await.as_deref(), Some("Approved"));
    assert!(notifier.sent.lock().await.is_empty());
}

#[tokio::test]
async fn configured_threshold_is_used() {
    let store = Arc::new(MemoryStore::new());
    let id = store
        .create("purchaseorder", fields(json!({"total": 150})))
        .await
        .unwrap();
    let config = FacadeConfig {
        approval_threshold: 100.0,
        ..FacadeConfig::default()
    };
    let workflow = ApprovalWorkflow::new(store, Arc::new(RecordingNotifier::default()), &config);

    assert_eq!(workflow.policy().threshold, 100.0);
    let report = workflow.run(&id).await.unwrap();
    assert_eq!(report.outcome, ApprovalOutcome::RequiresApproval);
}

#[tokio::test]
async fn unknown_purchase_order_is_not_found() {
    let (workflow, _, _, _) = setup(json!({"total": 1})).await;

    let err = workflow.run("999").await.unwrap_err();
    assert_eq!(err.kind(), "not_found");
    assert_eq!(err.to_string(), "Purchase Order not found: 999");

    let envelope = workflow.handle("999").await;
    assert!(!envelope.success);
    assert_eq!(envelope.message.as_deref(), Some("Purchase Order not found: 999"));
}

#[tokio::test]
async fn notifier_failure_is_surfaced() {
    let store = Arc::new(MemoryStore::new());
    let id = store
        .create("purchaseorder", fields(json!({"total": 8000, "nextapprover": "3"})))
        .await
        .unwrap();
    let workflow = ApprovalWorkflow::new(store, Arc::new(FailingNotifier), &FacadeConfig::default());

    let envelope = workflow.handle(&id).await;
    assert!(!envelope.success);
    assert_eq!(
        envelope.message.as_deref(),
        Some("notification failed: mail relay unavailable")
    );
}

#[tokio::test]
async fn handle_reports_outcome_in_envelope() {
    let (workflow, _, _, id) = setup(json!({"total": 20})).await;

    let envelope = workflow.handle(&id).await;
    assert!(envelope.success);
    assert_eq!(envelope.message.as_deref(), Some("Purchase Order auto-approved"));
    assert_eq!(envelope.id.as_deref(), Some(id.as_str()));
    let data = envelope.data.unwrap();
    assert_eq!(data["outcome"], "auto_approved");
    assert_eq!(data["status"], "Approved");
    assert_eq!(data["total"], 20.0);
}
