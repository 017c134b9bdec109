use async_trait::async_trait;

use crate::error::ProviderError;

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误状态（如 `INVALID_ARGUMENT`）
    pub status: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 请求的模型（用于 `ModelNotFound`）
    pub model: Option<String>,
    /// HTTP 状态码
    pub http_status: Option<u16>,
}

/// 错误映射 Trait（内部使用）
/// 将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.status,
            raw_message: raw.message,
        }
    }
}

/// Secret validation check.
///
/// Lightweight check of whether the provider accepts a secret. Implementations must
/// never fail: transport and parse problems count as "not accepted".
#[async_trait]
pub trait CredentialValidator: Send + Sync {
    /// Returns `true` when the provider accepted the secret.
    async fn validate(&self, secret: &str) -> bool;
}
