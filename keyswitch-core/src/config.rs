//! Store and environment configuration

use keyswitch_provider::ProviderConfig;

/// Record holding the serialized key list.
pub const DEFAULT_COLLECTION_KEY: &str = "gemini-api-keys";
/// Record holding the active index.
pub const DEFAULT_ACTIVE_INDEX_KEY: &str = "gemini-active-api-key-index";

/// Fallback key variables, in lookup order.
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "VITE_GEMINI_API_KEY"];
/// Proxy URL variables, in lookup order.
pub const PROXY_URL_VARS: &[&str] = &["GEMINI_PROXY_URL", "VITE_GEMINI_PROXY_URL"];
/// Overrides the API host (mainly for testing against a local server).
pub const API_BASE_VAR: &str = "GEMINI_API_BASE";

/// Names of the two persisted records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub collection_key: String,
    pub active_index_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            collection_key: DEFAULT_COLLECTION_KEY.to_string(),
            active_index_key: DEFAULT_ACTIVE_INDEX_KEY.to_string(),
        }
    }
}

/// Process-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// Fallback key, tried before any stored key.
    pub api_key: Option<String>,
    pub proxy_url: Option<String>,
    pub api_base: Option<String>,
}

impl EnvironmentConfig {
    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read through `lookup`; blank values count as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(*name))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
        };

        Self {
            api_key: first(API_KEY_VARS),
            proxy_url: first(PROXY_URL_VARS),
            api_base: first(&[API_BASE_VAR]),
        }
    }

    /// Client settings implied by this environment.
    #[must_use]
    pub fn provider_config(&self) -> ProviderConfig {
        let config = ProviderConfig::default().with_proxy_url(self.proxy_url.clone());
        match &self.api_base {
            Some(base) => config.with_api_base(base.clone()),
            None => config,
        }
    }
}
