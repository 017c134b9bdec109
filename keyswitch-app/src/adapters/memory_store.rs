//! In-memory key-value store. Nothing survives the process.

use std::collections::HashMap;
use std::sync::RwLock;

use keyswitch_core::error::{CoreError, CoreResult};
use keyswitch_core::traits::KeyValueStore;

#[derive(Default)]
pub struct MemoryKeyValueStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let records = self
            .records
            .read()
            .map_err(|e| CoreError::StorageError(format!("Lock poisoned: {e}")))?;
        Ok(records.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| CoreError::StorageError(format!("Lock poisoned: {e}")))?;
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
    }
}
