//! Platform-agnostic key-value storage adapters.

mod json_file_store;
mod memory_store;

pub use json_file_store::JsonFileKeyValueStore;
pub use memory_store::MemoryKeyValueStore;

#[cfg(feature = "keyring-store")]
mod keyring_store;

#[cfg(feature = "keyring-store")]
pub use keyring_store::KeyringKeyValueStore;
