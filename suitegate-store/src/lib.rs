//! Record store capability for SuiteGate.
//!
//! The ERP owns every persisted record; this crate defines the interface the
//! façade uses to reach it and two implementations:
//!
//! - [`RestRecordStore`]: the ERP's REST record service over HTTPS
//! - [`MemoryStore`]: process-local maps, for tests and local runs

mod error;
mod memory;
mod rest;
mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use rest::{RestRecordStore, RestStoreConfig};
pub use store::{RecordStore, StoreRecord};
