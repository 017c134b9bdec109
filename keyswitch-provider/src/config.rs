//! Client configuration

use std::time::Duration;

/// Public Generative Language API host.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒），图像生成通常较慢
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Where and how the client talks to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Base URL for direct calls and for key validation.
    pub api_base: String,
    /// When set, generation calls go through this proxy instead of `api_base`.
    pub proxy_url: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            proxy_url: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ProviderConfig {
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Blank values leave the proxy disabled.
    #[must_use]
    pub fn with_proxy_url(mut self, proxy_url: Option<String>) -> Self {
        self.proxy_url = proxy_url.filter(|url| !url.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn uses_proxy(&self) -> bool {
        self.proxy_url.is_some()
    }
}
