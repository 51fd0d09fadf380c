//! In-memory storage backend

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::StorageBackend;
use crate::error::{AppError, AppResult};

/// Keeps collections in a process-local map
///
/// Used by the test suite and by deployments that do not need data to
/// survive a restart.
#[derive(Default)]
pub struct MemoryBackend {
    collections: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read_collection(&self, name: &str) -> AppResult<Vec<Value>> {
        let collections = self
            .collections
            .lock()
            .map_err(|_| AppError::Internal("memory backend lock poisoned".to_string()))?;
        Ok(collections.get(name).cloned().unwrap_or_default())
    }

    fn write_collection(&self, name: &str, rows: Vec<Value>) -> AppResult<()> {
        let mut collections = self
            .collections
            .lock()
            .map_err(|_| AppError::Internal("memory backend lock poisoned".to_string()))?;
        collections.insert(name.to_string(), rows);
        Ok(())
    }

    fn write_collections(&self, writes: Vec<(String, Vec<Value>)>) -> AppResult<()> {
        let mut collections = self
            .collections
            .lock()
            .map_err(|_| AppError::Internal("memory backend lock poisoned".to_string()))?;
        for (name, rows) in writes {
            collections.insert(name, rows);
        }
        Ok(())
    }
}
