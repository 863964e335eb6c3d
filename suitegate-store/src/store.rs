//! Record store abstraction trait.
//!
//! The façade only ever talks to this interface. Field names passed across
//! it are store field ids (`companyname`), never caller-facing names.

use crate::error::StoreResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use suitegate_model::Fields;

/// A record as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    /// Store-assigned internal id.
    pub id: String,
    /// Store field id → value.
    pub fields: Fields,
}

/// Abstract record store interface.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the name of the store implementation.
    fn provider_name(&self) -> &'static str;

    /// Loads one record. Fails with `NotFound` when the id does not resolve.
    async fn get(&self, record_type: &str, id: &str) -> StoreResult<StoreRecord>;

    /// Lists up to `limit` records in store-defined order, restricted to `columns`
    /// when non-empty.
    async fn list(
        &self,
        record_type: &str,
        columns: &[&str],
        limit: usize,
    ) -> StoreResult<Vec<StoreRecord>>;

    /// Creates a record and returns its newly assigned id.
    async fn create(&self, record_type: &str, fields: Fields) -> StoreResult<String>;

    /// Sets the given fields on an existing record, leaving the others untouched.
    /// Returns the record's id.
    async fn update(&self, record_type: &str, id: &str, fields: Fields) -> StoreResult<String>;

    /// Deletes a record. Deleting an unknown id fails with `NotFound`.
    async fn delete(&self, record_type: &str, id: &str) -> StoreResult<()>;
}
