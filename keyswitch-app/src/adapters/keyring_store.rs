//! Keyring-based key-value store.
//!
//! Uses the system keychain (macOS Keychain, Windows Credential Manager,
//! Linux Secret Service) via the `keyring` crate. Each record is one keychain
//! entry under a shared service name.

use keyring::Entry;

use keyswitch_core::error::{CoreError, CoreResult};
use keyswitch_core::traits::KeyValueStore;

const DEFAULT_SERVICE_NAME: &str = "keyswitch";

pub struct KeyringKeyValueStore {
    service: String,
}

impl KeyringKeyValueStore {
    pub fn new() -> Self {
        Self::with_service(DEFAULT_SERVICE_NAME)
    }

    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> CoreResult<Entry> {
        Entry::new(&self.service, key).map_err(|e| CoreError::StorageError(e.to_string()))
    }
}

impl Default for KeyringKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for KeyringKeyValueStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CoreError::StorageError(e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| CoreError::StorageError(e.to_string()))?;
        log::debug!("Wrote record {key} to keychain service {}", self.service);
        Ok(())
    }
}
