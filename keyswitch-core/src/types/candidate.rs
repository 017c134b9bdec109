//! Failover candidate

/// Display name of the synthetic candidate built from the environment key.
pub const ENVIRONMENT_CANDIDATE_NAME: &str = "Environment Key";

/// Where a candidate came from.
///
/// Informational for callers of `FailoverInvoker::candidates`. The invoker itself finds
/// a winning key again by secret, because the collection may change while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Position in the stored collection at the time the list was built.
    Stored(usize),
    /// Process-level fallback key, not enrolled in the store.
    Environment,
}

/// A secret plus display name tried during one failover pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailoverCandidate {
    pub secret: String,
    pub display_name: String,
    pub source: CandidateSource,
}

impl FailoverCandidate {
    #[must_use]
    pub fn environment(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            display_name: ENVIRONMENT_CANDIDATE_NAME.to_string(),
            source: CandidateSource::Environment,
        }
    }
}
