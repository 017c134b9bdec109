//! Storage and validation abstraction trait definition

mod key_value_store;

pub use key_value_store::KeyValueStore;
pub use keyswitch_provider::CredentialValidator;
