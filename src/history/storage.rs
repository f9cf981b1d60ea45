//! Key-value persistence for small string lists.
//!
//! A store holds named slots, each an ordered list of strings. Writes replace
//! a slot wholesale.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt storage at {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode storage: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait KeyValueStore: Send + Sync {
    /// Reads a slot. `Ok(None)` means the slot has never been written.
    fn load_strings(&self, key: &str) -> Result<Option<Vec<String>>, StorageError>;

    fn store_strings(&self, key: &str, values: &[String]) -> Result<(), StorageError>;
}

/// Stores every slot in one JSON object on disk.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// reader never sees a half-written file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_map(&self) -> Result<Option<Map<String, Value>>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let map = serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        Ok(Some(map))
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let content = serde_json::to_string_pretty(map)?;

        let file_name = self
            .path
            .file_name()
            .map_or_else(|| "store".into(), |n| n.to_string_lossy().into_owned());
        let tmp_path = self
            .path
            .with_file_name(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()));

        std::fs::write(&tmp_path, content).map_err(|e| self.io_error(e))?;

        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(self.io_error(e));
        }

        debug!("Wrote key-value store to {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn load_strings(&self, key: &str) -> Result<Option<Vec<String>>, StorageError> {
        let Some(mut map) = self.read_map()? else {
            return Ok(None);
        };

        match map.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| StorageError::Corrupt {
                    path: self.path.clone(),
                    source,
                }),
        }
    }

    fn store_strings(&self, key: &str, values: &[String]) -> Result<(), StorageError> {
        let mut map = match self.read_map() {
            Ok(map) => map.unwrap_or_default(),
            Err(StorageError::Corrupt { source, .. }) => {
                warn!(
                    "Replacing unreadable store {}: {}",
                    self.path.display(),
                    source
                );
                Map::new()
            }
            Err(e) => return Err(e),
        };

        map.insert(key.to_string(), serde_json::to_value(values)?);
        self.write_map(&map)
    }
}

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, Vec<String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load_strings(&self, key: &str) -> Result<Option<Vec<String>>, StorageError> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn store_strings(&self, key: &str, values: &[String]) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(key.to_string(), values.to_vec());
        Ok(())
    }
}
