//! Entity CRUD façade.
//!
//! One entry point per operation, driven by the static descriptor table.
//! Every call is a single chain: resolve tag → validate → one store call.

use std::sync::Arc;

use serde_json::Value;
use suitegate_model::{EntityDescriptor, EntityType, Fields, Record, WriteMode, validator_for};
use suitegate_store::RecordStore;
use tracing::{debug, error, info, warn};

use crate::config::FacadeConfig;
use crate::envelope::Envelope;
use crate::error::{FacadeError, FacadeResult};
use crate::request::{EntityRequest, Operation};

/// Result of a read: one record when an id was given, a page otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    One(Record),
    Many(Vec<Record>),
}

impl ReadOutcome {
    pub fn to_data(&self) -> Value {
        match self {
            ReadOutcome::One(record) => record.to_data(),
            ReadOutcome::Many(records) => Value::Array(records.iter().map(Record::to_data).collect()),
        }
    }
}

pub struct EntityFacade {
    store: Arc<dyn RecordStore>,
    config: FacadeConfig,
}

impl EntityFacade {
    pub fn new(store: Arc<dyn RecordStore>, config: FacadeConfig) -> Self {
        Self { store, config }
    }

    /// Tags that accept `operation`.
    pub fn supported_tags(operation: Operation) -> Vec<&'static str> {
        match operation {
            Operation::Read => EntityType::readable_tags(),
            _ => EntityType::writable_tags(),
        }
    }

    /// Resolve a request tag for `operation`.
    ///
    /// Unknown tags report the set supported by that operation. A known but
    /// read-only tag used for a write is reported as unsupported operation.
    pub fn resolve(tag: Option<&str>, operation: Operation) -> FacadeResult<EntityType> {
        let tag = match tag.map(str::trim) {
            Some(tag) if !tag.is_empty() => tag,
            _ => {
                return Err(FacadeError::MissingEntityType {
                    supported: Self::supported_tags(operation),
                });
            }
        };
        let entity_type =
            EntityType::from_tag(tag).ok_or_else(|| FacadeError::UnsupportedEntityType {
                tag: tag.to_string(),
                supported: Self::supported_tags(operation),
            })?;
        Self::ensure_supported(entity_type, operation)?;
        Ok(entity_type)
    }

    fn ensure_supported(entity_type: EntityType, operation: Operation) -> FacadeResult<()> {
        if operation.is_mutation() && !entity_type.is_writable() {
            return Err(FacadeError::UnsupportedOperation {
                entity: entity_type,
                operation,
            });
        }
        Ok(())
    }

    /// Read one record by id, or the first page of records.
    pub async fn read(&self, entity_type: EntityType, id: Option<&str>) -> FacadeResult<ReadOutcome> {
        let descriptor = EntityDescriptor::for_type(entity_type);
        match id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => {
                let row = self
                    .store
                    .get(descriptor.record_type, id)
                    .await
                    .map_err(|e| FacadeError::from_store(entity_type, e))?;
                Ok(ReadOutcome::One(descriptor.from_store_fields(row.id, &row.fields)))
            }
            None => {
                let columns = descriptor.store_columns();
                let rows = self
                    .store
                    .list(descriptor.record_type, &columns, self.config.page_size)
                    .await
                    .map_err(|e| FacadeError::from_store(entity_type, e))?;
                debug!(entity = %entity_type, count = rows.len(), "Listed records");
                Ok(ReadOutcome::Many(
                    rows.iter()
                        .map(|row| descriptor.from_store_fields(row.id.clone(), &row.fields))
                        .collect(),
                ))
            }
        }
    }

    /// Validate and create a record. Returns the new id.
    pub async fn create(&self, entity_type: EntityType, payload: &Fields) -> FacadeResult<String> {
        Self::ensure_supported(entity_type, Operation::Create)?;
        let descriptor = EntityDescriptor::for_type(entity_type);
        validator_for(entity_type).validate(descriptor, payload, WriteMode::Create)?;

        let fields = Self::store_fields(descriptor, payload);
        let id = self
            .store
            .create(descriptor.record_type, fields)
            .await
            .map_err(|e| FacadeError::from_store(entity_type, e))?;

        info!(
            entity = %entity_type,
            id = %id,
            user = %self.config.acting_user,
            "{} created",
            entity_type.label()
        );
        Ok(id)
    }

    /// Validate and apply a partial update. Absent fields are left as they are.
    pub async fn update(
        &self,
        entity_type: EntityType,
        id: &str,
        payload: &Fields,
    ) -> FacadeResult<String> {
        Self::ensure_supported(entity_type, Operation::Update)?;
        let id = Self::require_id(Some(id), Operation::Update)?;
        let descriptor = EntityDescriptor::for_type(entity_type);
        validator_for(entity_type).validate(descriptor, payload, WriteMode::Update)?;

        let fields = Self::store_fields(descriptor, payload);
        let id = self
            .store
            .update(descriptor.record_type, id, fields)
            .await
            .map_err(|e| FacadeError::from_store(entity_type, e))?;

        info!(
            entity = %entity_type,
            id = %id,
            user = %self.config.acting_user,
            "{} updated",
            entity_type.label()
        );
        Ok(id)
    }

    /// Delete a record. Deleting an id twice fails the second time.
    pub async fn delete(&self, entity_type: EntityType, id: &str) -> FacadeResult<String> {
        Self::ensure_supported(entity_type, Operation::Delete)?;
        let id = Self::require_id(Some(id), Operation::Delete)?;
        let descriptor = EntityDescriptor::for_type(entity_type);
        self.store
            .delete(descriptor.record_type, id)
            .await
            .map_err(|e| FacadeError::from_store(entity_type, e))?;

        info!(
            entity = %entity_type,
            id = %id,
            user = %self.config.acting_user,
            "{} deleted",
            entity_type.label()
        );
        Ok(id.to_string())
    }

    /// Run one request and fold the outcome into an envelope. Never fails.
    pub async fn handle(&self, operation: Operation, request: EntityRequest) -> Envelope {
        debug!(
            operation = %operation,
            entity = request.entity.as_deref().unwrap_or(""),
            id = request.id.as_deref().unwrap_or(""),
            "Handling entity request"
        );
        match self.dispatch(operation, request).await {
            Ok(envelope) => envelope,
            Err(err) => {
                if err.is_caller_error() {
                    warn!(operation = %operation, kind = err.kind(), "Request rejected: {}", err);
                } else {
                    error!(operation = %operation, kind = err.kind(), "Request failed: {}", err);
                }
                Envelope::from(err)
            }
        }
    }

    async fn dispatch(&self, operation: Operation, request: EntityRequest) -> FacadeResult<Envelope> {
        let entity_type = Self::resolve(request.entity.as_deref(), operation)?;
        let label = entity_type.label();
        match operation {
            Operation::Read => {
                let outcome = self.read(entity_type, request.id.as_deref()).await?;
                Ok(Envelope::data(outcome.to_data()))
            }
            Operation::Create => {
                let id = self.create(entity_type, &request.fields).await?;
                Ok(Envelope::done(format!("{label} created successfully"), id))
            }
            Operation::Update => {
                let id = Self::require_id(request.id.as_deref(), operation)?;
                let id = self.update(entity_type, id, &request.fields).await?;
                Ok(Envelope::done(format!("{label} updated successfully"), id))
            }
            Operation::Delete => {
                let id = Self::require_id(request.id.as_deref(), operation)?;
                let id = self.delete(entity_type, id).await?;
                Ok(Envelope::done(format!("{label} deleted successfully"), id))
            }
        }
    }

    fn require_id(id: Option<&str>, operation: Operation) -> FacadeResult<&str> {
        id.map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(FacadeError::MissingId { operation })
    }

    fn store_fields(descriptor: &EntityDescriptor, payload: &Fields) -> Fields {
        let mut fields = descriptor.to_store_fields(payload);
        if let Some(stamp) = descriptor.validation_stamp {
            fields.insert(
                stamp.to_string(),
                Value::String(EntityDescriptor::VALIDATION_STAMP.to_string()),
            );
        }
        fields
    }
}
