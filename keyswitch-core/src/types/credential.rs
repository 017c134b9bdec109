//! API key entry types

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// One stored API key.
///
/// `last_validated` / `last_validated_at` are an advisory cache written only by an
/// explicit validation pass. `None` means "never tested", not "invalid".
///
/// Persisted as `{id, secret, displayName, isValid?, lastTested?}` with `lastTested` in
/// epoch milliseconds, the shape the key form reads and writes. Older records that use
/// `key` / `name` are still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialEntry {
    /// Caller-generated, immutable. Uniqueness is not checked.
    pub id: String,
    /// May be empty while the entry is a draft.
    #[serde(alias = "key")]
    pub secret: String,
    #[serde(alias = "name")]
    pub display_name: String,
    #[serde(rename = "isValid", default, skip_serializing_if = "Option::is_none")]
    pub last_validated: Option<bool>,
    #[serde(
        rename = "lastTested",
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub last_validated_at: Option<DateTime<Utc>>,
}

impl CredentialEntry {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        secret: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
            display_name: display_name.into(),
            last_validated: None,
            last_validated_at: None,
        }
    }

    /// Blank entry as created by the key form: timestamp id, empty secret,
    /// default name `API Key {n}` where `n` is one past `existing`.
    #[must_use]
    pub fn draft(existing: usize) -> Self {
        Self::new(
            Utc::now().timestamp_millis().to_string(),
            String::new(),
            format!("API Key {}", existing + 1),
        )
    }

    pub fn has_secret(&self) -> bool {
        !self.secret.is_empty()
    }

    /// Whitespace-only secrets count as blank.
    pub fn is_blank(&self) -> bool {
        self.secret.trim().is_empty()
    }

    /// Usable for round-robin: has a secret and was not explicitly marked invalid.
    pub fn is_eligible(&self) -> bool {
        self.has_secret() && self.last_validated != Some(false)
    }

    /// Stamp the result of a validation pass. `at` is kept to millisecond precision,
    /// the resolution it is persisted with.
    pub fn mark_validated(&mut self, valid: bool, at: DateTime<Utc>) {
        self.last_validated = Some(valid);
        self.last_validated_at = Some(at.trunc_subsecs(3));
    }
}

/// Drop draft entries (blank secrets) before a save.
#[must_use]
pub fn retain_committed(entries: Vec<CredentialEntry>) -> Vec<CredentialEntry> {
    entries.into_iter().filter(|e| !e.is_blank()).collect()
}

/// Partial update of a [`CredentialEntry`]. `id` cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// `Some(None)` clears the cached result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_validated: Option<Option<bool>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_validated_at: Option<Option<DateTime<Utc>>>,
}

impl CredentialUpdate {
    #[must_use]
    pub fn secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn display_name(name: impl Into<String>) -> Self {
        Self {
            display_name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn validation(valid: Option<bool>, at: Option<DateTime<Utc>>) -> Self {
        Self {
            last_validated: Some(valid),
            last_validated_at: Some(at),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// 应用更新到现有条目
    pub fn apply_to(&self, entry: &mut CredentialEntry) {
        if let Some(ref secret) = self.secret {
            entry.secret.clone_from(secret);
        }
        if let Some(ref name) = self.display_name {
            entry.display_name.clone_from(name);
        }
        if let Some(valid) = self.last_validated {
            entry.last_validated = valid;
        }
        if let Some(at) = self.last_validated_at {
            entry.last_validated_at = at;
        }
    }
}
