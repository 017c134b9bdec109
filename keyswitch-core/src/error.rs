//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error types
pub use keyswitch_provider::{FailureKind, ProviderError};

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No stored key and no environment key, or every key is blank
    #[error("No API key is configured. Please add your Gemini API key first.")]
    NoCredentialsConfigured,

    /// Every non-blank key was tried once and all failed.
    ///
    /// Displays the user-facing message for `kind`; `last_error` keeps the raw text of
    /// the final failure.
    #[error("{}", .kind.user_message())]
    CredentialsExhausted {
        kind: FailureKind,
        attempts: usize,
        last_error: String,
    },

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (missing configuration, rejected keys, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NoCredentialsConfigured | Self::ValidationError(_) => true,
            Self::CredentialsExhausted { kind, .. } => *kind != FailureKind::Generic,
            Self::Provider(e) => e.is_expected(),
            _ => false,
        }
    }

    /// Build the exhausted error from the final failure's text.
    #[must_use]
    pub fn exhausted(attempts: usize, last_error: impl Into<String>) -> Self {
        let last_error = last_error.into();
        Self::CredentialsExhausted {
            kind: FailureKind::classify(&last_error),
            attempts,
            last_error,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_classifies_last_error() {
        let e = CoreError::exhausted(3, "429 RESOURCE_EXHAUSTED");
        assert!(matches!(
            e,
            CoreError::CredentialsExhausted {
                kind: FailureKind::Quota,
                attempts: 3,
                ..
            }
        ));
        assert_eq!(e.to_string(), FailureKind::Quota.user_message());
        assert!(e.is_expected());
    }

    #[test]
    fn generic_exhaustion_is_unexpected() {
        let e = CoreError::exhausted(1, "socket closed");
        assert_eq!(e.to_string(), FailureKind::Generic.user_message());
        assert!(!e.is_expected());
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::NoCredentialsConfigured).unwrap_or_default();
        assert_eq!(json["code"], "NoCredentialsConfigured");

        let json = serde_json::to_value(CoreError::exhausted(2, "API key not valid"))
            .unwrap_or_default();
        assert_eq!(json["code"], "CredentialsExhausted");
        assert_eq!(json["details"]["kind"], "auth");
        assert_eq!(json["details"]["attempts"], 2);
    }
}
