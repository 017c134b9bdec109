use serde::{Deserialize, Serialize};

/// Unified error type for all Generative Language API operations.
///
/// Each variant includes a `provider` field identifying which endpoint family produced
/// the error, plus variant-specific context. All variants are serializable for
/// structured error reporting.
///
/// The `Display` output always carries the raw provider message when one is available,
/// so that [`FailureKind::classify`] can work on the rendered text alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API key was rejected.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The key is valid but not allowed to call the requested model or method.
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The key's quota is used up (`RESOURCE_EXHAUSTED`).
    QuotaExceeded {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The request itself was rejected (bad prompt, bad image, unsupported config).
    InvalidArgument {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API.
        raw_message: String,
    },

    /// The prompt or the generated content was blocked by safety filters.
    ContentBlocked {
        /// Provider that produced the error.
        provider: String,
        /// Block or finish reason reported by the API.
        reason: String,
    },

    /// The requested model does not exist or is not served on this endpoint.
    ModelNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Model identifier that was requested.
        model: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The call succeeded but produced nothing usable (no text, no image).
    EmptyResponse {
        /// Provider that produced the error.
        provider: String,
        /// What was expected.
        expected: String,
    },

    /// The configured base or proxy URL could not be turned into a request URL.
    InvalidEndpoint {
        /// Provider that produced the error.
        provider: String,
        /// Details about the URL problem.
        detail: String,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the API.
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw status string from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（用户输入、凭证失效等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::QuotaExceeded { .. }
                | Self::RateLimited { .. }
                | Self::InvalidArgument { .. }
                | Self::ContentBlocked { .. }
                | Self::ModelNotFound { .. }
                | Self::EmptyResponse { .. }
        )
    }

    /// User-facing category of this error.
    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        FailureKind::classify(&self.to_string())
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials (API_KEY_INVALID): {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials (API_KEY_INVALID)")
                }
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::QuotaExceeded {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Quota exceeded: {msg}")
                } else {
                    write!(f, "[{provider}] Quota exceeded")
                }
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::InvalidArgument {
                provider,
                raw_message,
            } => {
                write!(f, "[{provider}] INVALID_ARGUMENT: {raw_message}")
            }
            Self::ContentBlocked { provider, reason } => {
                write!(f, "[{provider}] Content blocked by safety filters: {reason}")
            }
            Self::ModelNotFound {
                provider,
                model,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Model '{model}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Model '{model}' not found")
                }
            }
            Self::EmptyResponse { provider, expected } => {
                write!(f, "[{provider}] Response contained no {expected}")
            }
            Self::InvalidEndpoint { provider, detail } => {
                write!(f, "[{provider}] Invalid endpoint: {detail}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => {
                write!(f, "[{provider}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// User-facing category of a failed generation call.
///
/// Derived from the text of the final error only, so it works for any error type the
/// request layer produces. Matching is case-insensitive and best-effort; anything that
/// matches no known phrase is [`FailureKind::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// The key was rejected.
    Auth,
    /// Quota used up or rate limit reached.
    Quota,
    /// Prompt or output blocked by safety filters.
    SafetyBlock,
    /// The request input was rejected.
    InvalidArgument,
    /// Anything else.
    Generic,
}

const AUTH_PHRASES: &[&str] = &["api key not valid", "api_key_invalid"];
const QUOTA_PHRASES: &[&str] = &["resource_exhausted", "rate limit", "quota"];
const SAFETY_PHRASES: &[&str] = &["safety", "blocked"];
const INVALID_ARGUMENT_PHRASES: &[&str] = &["invalid_argument"];

impl FailureKind {
    /// Classify an error message. Earlier categories win when several match.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let message = message.to_lowercase();
        let matches_any = |phrases: &[&str]| phrases.iter().any(|p| message.contains(p));

        if matches_any(AUTH_PHRASES) {
            Self::Auth
        } else if matches_any(QUOTA_PHRASES) {
            Self::Quota
        } else if matches_any(SAFETY_PHRASES) {
            Self::SafetyBlock
        } else if matches_any(INVALID_ARGUMENT_PHRASES) {
            Self::InvalidArgument
        } else {
            Self::Generic
        }
    }

    /// Message suitable for showing to the end user.
    #[must_use]
    pub fn user_message(self) -> &'static str {
        match self {
            Self::Auth => "The API key you provided is invalid or incorrect. Please check it and try again.",
            Self::Quota => {
                "Your API key quota is used up or the rate limit was reached. Check your Google AI Studio quota or try again later."
            }
            Self::SafetyBlock => {
                "The generated content may violate the safety policy and was blocked. Try adjusting your prompt."
            }
            Self::InvalidArgument => {
                "Your input is invalid. Check your prompt or uploaded images and try again."
            }
            Self::Generic => {
                "Generation failed. Please try again later or check your network connection."
            }
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.user_message())
    }
}
