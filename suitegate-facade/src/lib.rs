//! Entity CRUD façade for SuiteGate.
//!
//! Accepts `{entity, id?, ...fields}` requests, validates them against the
//! entity's descriptor and rule set, performs one store call, and answers
//! with a `{success, message?, id?, data?}` envelope. Also hosts the
//! purchase-order approval action.

mod approval;
mod config;
mod envelope;
mod error;
mod facade;
mod request;

pub use approval::{
    ApprovalNotice, ApprovalNotifier, ApprovalReport, ApprovalWorkflow, LogNotifier, NOTICE_SUBJECT,
};
pub use config::{DEFAULT_PAGE_SIZE, FacadeConfig};
pub use envelope::Envelope;
pub use error::{FacadeError, FacadeResult};
pub use facade::{EntityFacade, ReadOutcome};
pub use request::{EntityQuery, EntityRequest, Operation};
