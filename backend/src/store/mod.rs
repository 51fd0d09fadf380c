//! Persistence layer for the Wood Traceability Platform
//!
//! Domain entities live in named collections of JSON documents behind the
//! [`StorageBackend`] port. [`Store`] is the typed facade the services use;
//! it owns the write lock and the multi-collection commits.

pub mod json_file;
pub mod memory;
pub mod typed;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;
pub use typed::{Store, StoreSnapshot};

use serde_json::Value;

use crate::error::AppResult;

/// Names of the stored collections
pub mod collections {
    pub const PREADVICE: &str = "preadvice";
    pub const RECEIPTS: &str = "receipts";
    pub const INVENTORY: &str = "inventory";
    pub const PRODUCTION_RUNS: &str = "production_runs";
    pub const PRODUCED_PRODUCTS: &str = "produced_products";
}

/// Storage port for named collections of JSON documents
///
/// A missing collection reads as empty. `write_collections` must land
/// every staged collection or none of them.
pub trait StorageBackend: Send + Sync {
    fn read_collection(&self, name: &str) -> AppResult<Vec<Value>>;
    fn write_collection(&self, name: &str, rows: Vec<Value>) -> AppResult<()>;
    fn write_collections(&self, writes: Vec<(String, Vec<Value>)>) -> AppResult<()>;
}
