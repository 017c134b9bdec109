//! Key failover

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::CredentialStore;
use crate::types::{CandidateSource, FailoverCandidate};

/// Runs one operation against each configured key in turn until one succeeds.
///
/// Each key is tried at most once per [`invoke`](Self::invoke), in order, with no delay
/// between attempts. The winning stored key becomes the active one. Concurrent calls
/// are independent; the active index they leave behind is a hint, last writer wins.
pub struct FailoverInvoker {
    store: Arc<CredentialStore>,
}

impl FailoverInvoker {
    #[must_use]
    pub fn new(store: Arc<CredentialStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    /// Stored keys in order, with the environment key in front unless it is already stored.
    pub fn candidates(&self) -> Vec<FailoverCandidate> {
        let entries = self.store.get_all();
        let mut candidates = Vec::with_capacity(entries.len() + 1);

        if let Some(env) = self.store.environment_secret() {
            if !entries.iter().any(|e| e.secret == env) {
                candidates.push(FailoverCandidate::environment(env));
            }
        }

        candidates.extend(entries.into_iter().enumerate().map(|(index, e)| {
            FailoverCandidate {
                secret: e.secret,
                display_name: e.display_name,
                source: CandidateSource::Stored(index),
            }
        }));
        candidates
    }

    /// Call `operation` with each candidate key until one returns `Ok`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NoCredentialsConfigured`] when there is no non-blank key; the
    ///   operation is never called in that case.
    /// - [`CoreError::CredentialsExhausted`] when every non-blank key failed, classified
    ///   from the last failure.
    pub async fn invoke<T, E, F, Fut>(&self, mut operation: F) -> CoreResult<T>
    where
        E: Display,
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let candidates = self.candidates();
        if candidates.is_empty() {
            log::warn!("No API keys configured");
            return Err(CoreError::NoCredentialsConfigured);
        }

        let last = candidates.len() - 1;
        let mut attempts = 0;
        let mut last_error: Option<String> = None;

        for (position, candidate) in candidates.into_iter().enumerate() {
            if candidate.secret.is_empty() {
                continue;
            }

            attempts += 1;
            match operation(candidate.secret.clone()).await {
                Ok(value) => {
                    self.remember(&candidate);
                    return Ok(value);
                }
                Err(e) => {
                    let message = e.to_string();
                    log::warn!("API key {} failed: {message}", candidate.display_name);
                    if position == last {
                        return Err(CoreError::exhausted(attempts, message));
                    }
                    last_error = Some(message);
                }
            }
        }

        // Only reachable when the final candidate was blank.
        match last_error {
            Some(message) => Err(CoreError::exhausted(attempts, message)),
            None => {
                log::warn!("All configured API keys are empty");
                Err(CoreError::NoCredentialsConfigured)
            }
        }
    }

    /// Point the active index at the winner's position in the live collection.
    fn remember(&self, candidate: &FailoverCandidate) {
        let position = self
            .store
            .get_all()
            .iter()
            .position(|e| e.secret == candidate.secret);

        match position {
            Some(index) => {
                log::debug!("API key {} succeeded, now active", candidate.display_name);
                self.store.set_active_index(index);
            }
            None => log::debug!("API key {} succeeded", candidate.display_name),
        }
    }
}
