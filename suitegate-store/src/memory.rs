//! In-memory record store.
//!
//! Backs tests and local development. Ids are sequential integers shared
//! across record types, and listing returns records in id order.

use crate::error::{StoreError, StoreResult};
use crate::store::{RecordStore, StoreRecord};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use suitegate_model::Fields;
use tokio::sync::RwLock;
use tracing::debug;

type Table = BTreeMap<u64, Fields>;

/// A [`RecordStore`] that keeps every record in process memory.
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Table>>,
    next_id: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of live records of `record_type`.
    pub async fn count(&self, record_type: &str) -> usize {
        self.tables
            .read()
            .await
            .get(record_type)
            .map_or(0, BTreeMap::len)
    }

    fn parse_id(record_type: &str, id: &str) -> StoreResult<u64> {
        id.trim()
            .parse()
            .map_err(|_| StoreError::not_found(record_type, id))
    }
}

fn select(fields: &Fields, columns: &[&str]) -> Fields {
    if columns.is_empty() {
        return fields.clone();
    }
    fields
        .iter()
        .filter(|(k, _)| columns.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn provider_name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, record_type: &str, id: &str) -> StoreResult<StoreRecord> {
        let key = Self::parse_id(record_type, id)?;
        let tables = self.tables.read().await;
        let fields = tables
            .get(record_type)
            .and_then(|t| t.get(&key))
            .ok_or_else(|| StoreError::not_found(record_type, id))?;
        Ok(StoreRecord {
            id: key.to_string(),
            fields: fields.clone(),
        })
    }

    async fn list(
        &self,
        record_type: &str,
        columns: &[&str],
        limit: usize,
    ) -> StoreResult<Vec<StoreRecord>> {
        let tables = self.tables.read().await;
        let Some(table) = tables.get(record_type) else {
            return Ok(Vec::new());
        };
        Ok(table
            .iter()
            .take(limit)
            .map(|(id, fields)| StoreRecord {
                id: id.to_string(),
                fields: select(fields, columns),
            })
            .collect())
    }

    async fn create(&self, record_type: &str, fields: Fields) -> StoreResult<String> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.tables
            .write()
            .await
            .entry(record_type.to_string())
            .or_default()
            .insert(id, fields);
        debug!(record_type, id, "memory store created record");
        Ok(id.to_string())
    }

    async fn update(&self, record_type: &str, id: &str, fields: Fields) -> StoreResult<String> {
        let key = Self::parse_id(record_type, id)?;
        let mut tables = self.tables.write().await;
        let existing = tables
            .get_mut(record_type)
            .and_then(|t| t.get_mut(&key))
            .ok_or_else(|| StoreError::not_found(record_type, id))?;
        for (name, value) in fields {
            existing.insert(name, value);
        }
        Ok(key.to_string())
    }

    async fn delete(&self, record_type: &str, id: &str) -> StoreResult<()> {
        let key = Self::parse_id(record_type, id)?;
        let mut tables = self.tables.write().await;
        tables
            .get_mut(record_type)
            .and_then(|t| t.remove(&key))
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(record_type, id))
    }
}
