//! Generative Language API error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::GeminiClient;
use super::types::ApiErrorEnvelope;

/// Reference: <https://ai.google.dev/gemini-api/docs/troubleshooting#error-codes>
impl ProviderErrorMapper for GeminiClient {
    fn provider_name(&self) -> &'static str {
        super::PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        let lower = raw.message.to_lowercase();

        // Bad keys come back as 400 INVALID_ARGUMENT, so check the message first.
        if lower.contains("api key not valid") || lower.contains("api_key_invalid") {
            return ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            };
        }

        match raw.status.as_deref() {
            Some("UNAUTHENTICATED") => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },
            Some("PERMISSION_DENIED") => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },
            Some("RESOURCE_EXHAUSTED") => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
            },
            Some("INVALID_ARGUMENT" | "FAILED_PRECONDITION") => ProviderError::InvalidArgument {
                provider,
                raw_message: raw.message,
            },
            Some("NOT_FOUND") => ProviderError::ModelNotFound {
                provider,
                model: context.model.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },
            Some("UNAVAILABLE" | "DEADLINE_EXCEEDED") => ProviderError::NetworkError {
                provider,
                detail: raw.message,
            },
            _ => match context.http_status {
                Some(401) => ProviderError::InvalidCredentials {
                    provider,
                    raw_message: Some(raw.message),
                },
                Some(403) => ProviderError::PermissionDenied {
                    provider,
                    raw_message: Some(raw.message),
                },
                _ => self.unknown_error(raw),
            },
        }
    }
}

impl GeminiClient {
    /// Map a non-success response body to a `ProviderError`.
    ///
    /// Bodies that are not the standard `{"error": {...}}` envelope (e.g. plain text from
    /// a proxy) are kept verbatim as the raw message.
    pub(crate) fn error_from_response(&self, body: &str, context: ErrorContext) -> ProviderError {
        let raw = match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) => match envelope.error.status {
                Some(status) => RawApiError::with_status(status, envelope.error.message),
                None => RawApiError::new(envelope.error.message),
            },
            Err(_) => RawApiError::new(body.trim()),
        };
        log::debug!("[{}] API error: {raw:?}", self.provider_name());
        self.map_error(raw, context)
    }
}
