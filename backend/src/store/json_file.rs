//! JSON file storage backend

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use super::StorageBackend;
use crate::error::{AppError, AppResult};

/// Stores each collection as a JSON array in `<data_dir>/<name>.json`
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-write never leaves a half-written collection behind. Batch
/// commits stage every file before renaming any of them.
pub struct JsonFileBackend {
    data_dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> AppResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|e| {
            AppError::StorageError(format!(
                "cannot create data directory {}: {}",
                data_dir.display(),
                e
            ))
        })?;
        Ok(Self { data_dir })
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", name))
    }

    /// Writes the rows to a temporary file next to the collection file
    fn stage(&self, name: &str, rows: &[Value]) -> AppResult<PathBuf> {
        let tmp = self.data_dir.join(format!(".{}.json.tmp", name));
        let body = serde_json::to_string_pretty(rows).map_err(|e| {
            AppError::StorageError(format!("cannot serialize collection {}: {}", name, e))
        })?;
        fs::write(&tmp, body).map_err(|e| {
            AppError::StorageError(format!("cannot write {}: {}", tmp.display(), e))
        })?;
        Ok(tmp)
    }

    fn promote(&self, tmp: &PathBuf, name: &str) -> AppResult<()> {
        let dest = self.collection_path(name);
        fs::rename(tmp, &dest).map_err(|e| {
            AppError::StorageError(format!("cannot move {} into place: {}", dest.display(), e))
        })
    }
}

impl StorageBackend for JsonFileBackend {
    fn read_collection(&self, name: &str) -> AppResult<Vec<Value>> {
        let path = self.collection_path(name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let body = fs::read_to_string(&path).map_err(|e| {
            AppError::StorageError(format!("cannot read {}: {}", path.display(), e))
        })?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&body).map_err(|e| {
            AppError::StorageError(format!("corrupt collection file {}: {}", path.display(), e))
        })
    }

    fn write_collection(&self, name: &str, rows: Vec<Value>) -> AppResult<()> {
        let tmp = self.stage(name, &rows)?;
        self.promote(&tmp, name)
    }

    fn write_collections(&self, writes: Vec<(String, Vec<Value>)>) -> AppResult<()> {
        let mut staged = Vec::with_capacity(writes.len());
        for (name, rows) in &writes {
            staged.push((self.stage(name, rows)?, name.clone()));
        }
        for (tmp, name) in staged {
            self.promote(&tmp, &name)?;
        }
        Ok(())
    }
}
