//! JSON file key-value store.
//!
//! All records live in one JSON object file (`{"record": "value", ...}`). Every `set`
//! rewrites the whole file through a sibling temp file and a rename, so a crash never
//! leaves a half-written file behind. The file is re-read on every `get`, so edits made
//! by another process are picked up; concurrent writers from different processes race
//! and the last rename wins. A file that is not a JSON object of strings fails reads and
//! is replaced by the next `set`.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use keyswitch_core::error::{CoreError, CoreResult};
use keyswitch_core::traits::KeyValueStore;

type Records = BTreeMap<String, String>;

pub struct JsonFileKeyValueStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileKeyValueStore {
    /// The file and its parent directory are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> CoreResult<Records> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Records::new()),
            Err(e) => {
                return Err(CoreError::StorageError(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(Records::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            CoreError::SerializationError(format!(
                "{} is not a JSON object of strings: {e}",
                self.path.display()
            ))
        })
    }

    fn write_records(&self, records: &Records) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CoreError::StorageError(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| {
            CoreError::StorageError(format!("Failed to write {}: {e}", tmp.display()))
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            CoreError::StorageError(format!("Failed to replace {}: {e}", self.path.display()))
        })
    }
}

impl KeyValueStore for JsonFileKeyValueStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.read_records()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| CoreError::StorageError(format!("Lock poisoned: {e}")))?;

        let mut records = match self.read_records() {
            Ok(records) => records,
            Err(CoreError::SerializationError(e)) => {
                log::warn!("Overwriting unreadable store file: {e}");
                Records::new()
            }
            Err(e) => return Err(e),
        };
        records.insert(key.to_string(), value.to_string());
        self.write_records(&records)?;
        log::debug!("Wrote record {key} to {}", self.path.display());
        Ok(())
    }
}
