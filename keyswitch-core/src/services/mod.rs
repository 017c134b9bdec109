//! Service layer

mod credential_store;
mod failover_invoker;

pub use credential_store::CredentialStore;
pub use failover_invoker::FailoverInvoker;
