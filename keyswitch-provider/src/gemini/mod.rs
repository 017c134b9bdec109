//! Generative Language API client

mod endpoint;
mod error;
mod provider;
mod types;

use reqwest::Client;

use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};

pub(crate) const PROVIDER_NAME: &str = "gemini";
/// Header the proxy uses to recognise forwarded traffic.
pub(crate) const PROXY_CLIENT_HEADER: &str = "gemini-studio-web-proxy";

/// Client for the Generative Language API.
///
/// Holds no secret: every call takes the API key to use, so one client can be driven
/// across all stored keys by the failover layer.
pub struct GeminiClient {
    pub(crate) client: Client,
    pub(crate) config: ProviderConfig,
}

impl GeminiClient {
    /// 创建带超时配置的客户端
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ProviderError::NetworkError {
                provider: PROVIDER_NAME.to_string(),
                detail: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}
