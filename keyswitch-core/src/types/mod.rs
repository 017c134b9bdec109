//! Type definition module

mod candidate;
mod credential;

pub use candidate::{CandidateSource, FailoverCandidate, ENVIRONMENT_CANDIDATE_NAME};
pub use credential::{retain_committed, CredentialEntry, CredentialUpdate};
