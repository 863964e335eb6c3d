//! Core entity model for SuiteGate.
//!
//! Defines the types every other SuiteGate crate depends on:
//! - [`EntityType`]: the entity-type tag carried by each request
//! - [`EntityDescriptor`]: an entity type's fixed field mapping and required fields
//! - [`Record`]: a record as returned to callers (id plus mapped fields)
//! - [`RecordValidator`]: per-entity write rules run before any store mutation
//! - [`ApprovalPolicy`]: the purchase-order approval threshold decision
//!
//! Field names on this side are the caller-facing names (`companyName`);
//! descriptors translate them to store field ids (`companyname`).

mod approval;
mod entity;
mod handler;
mod schema;
mod validation;

pub use approval::{ApprovalOutcome, ApprovalPolicy, ApprovalStatus, DEFAULT_APPROVAL_THRESHOLD};
pub use entity::{EntityType, Fields, Record};
pub use handler::{RecordValidator, WriteMode, validator_for};
pub use schema::{EntityDescriptor, FieldDefault, FieldMapping, FieldType};
pub use validation::{
    ApprovalDecision, ValidationError, ValidationResult, as_number, has_value,
    validate_email_format, validate_required, validate_threshold,
};
