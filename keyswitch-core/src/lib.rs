//! keyswitch core library
//!
//! Lets an application call a generative-AI API with one of several user-supplied
//! API keys, skipping to the next key when one fails:
//! - Credential Store ([`CredentialStore`]): ordered, persisted key list with
//!   validation metadata, active-key selection and round-robin lookup
//! - Failover Invoker ([`FailoverInvoker`]): runs one operation against each key in
//!   turn until one succeeds and remembers the winner
//!
//! Persistence goes through the [`KeyValueStore`] trait so every frontend can plug
//! in its own local storage.

pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::{EnvironmentConfig, StoreConfig};
pub use error::{CoreError, CoreResult};
pub use services::{CredentialStore, FailoverInvoker};
pub use traits::{CredentialValidator, KeyValueStore};
pub use types::{CandidateSource, CredentialEntry, CredentialUpdate, FailoverCandidate};
