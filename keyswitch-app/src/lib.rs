//! Platform-agnostic application bootstrap for keyswitch.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter injection).
//! Every frontend builds one `AppState` at startup and drives generation through it.

pub mod adapters;

use std::sync::Arc;

use keyswitch_core::config::{EnvironmentConfig, StoreConfig};
use keyswitch_core::error::{CoreError, CoreResult};
use keyswitch_core::services::{CredentialStore, FailoverInvoker};
use keyswitch_core::traits::{CredentialValidator, KeyValueStore};
use keyswitch_provider::{GeminiClient, GenerateContentRequest};

/// Model used when the caller does not name one.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
/// Upper bound on images returned by one generation call.
pub const MAX_IMAGES: usize = 4;

/// Platform-agnostic application state.
pub struct AppState {
    /// Credential store (shared with the invoker)
    pub store: Arc<CredentialStore>,
    /// Failover invoker over `store`
    pub invoker: FailoverInvoker,
    /// API client used for generation
    pub client: Arc<GeminiClient>,
}

impl AppState {
    /// Text generation, failing over across every configured key.
    pub async fn generate_text(&self, model: &str, prompt: &str) -> CoreResult<String> {
        let client = &self.client;
        self.invoker
            .invoke(|secret| async move { client.generate_text(&secret, model, prompt).await })
            .await
    }

    /// Image generation, failing over across every configured key.
    ///
    /// Returns at most [`MAX_IMAGES`] `data:` URLs.
    pub async fn generate_images(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> CoreResult<Vec<String>> {
        let client = &self.client;
        self.invoker
            .invoke(|secret| async move {
                client
                    .generate_images(&secret, model, request.clone(), MAX_IMAGES)
                    .await
            })
            .await
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `key_value_store` — where the key list and active index are persisted
///
/// # Optional
/// - `validator` — defaults to the API client's model-listing check
/// - `store_config` — record names, defaults to [`StoreConfig::default`]
/// - `environment` — fallback key and endpoint settings, defaults to none
pub struct AppStateBuilder {
    key_value_store: Option<Arc<dyn KeyValueStore>>,
    validator: Option<Arc<dyn CredentialValidator>>,
    store_config: StoreConfig,
    environment: EnvironmentConfig,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            key_value_store: None,
            validator: None,
            store_config: StoreConfig::default(),
            environment: EnvironmentConfig::default(),
        }
    }

    #[must_use]
    pub fn key_value_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.key_value_store = Some(store);
        self
    }

    #[must_use]
    pub fn validator(mut self, validator: Arc<dyn CredentialValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    #[must_use]
    pub fn store_config(mut self, config: StoreConfig) -> Self {
        self.store_config = config;
        self
    }

    #[must_use]
    pub fn environment(mut self, environment: EnvironmentConfig) -> Self {
        self.environment = environment;
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing, or
    /// `CoreError::Provider` if the HTTP client cannot be created.
    pub fn build(self) -> CoreResult<AppState> {
        let key_value_store = self.key_value_store.ok_or_else(|| {
            CoreError::ValidationError("key_value_store is required".to_string())
        })?;

        let client = Arc::new(GeminiClient::new(self.environment.provider_config())?);
        let validator = self
            .validator
            .unwrap_or_else(|| Arc::clone(&client) as Arc<dyn CredentialValidator>);

        if self.environment.api_key.is_some() {
            log::info!("Using fallback API key from environment");
        }

        let store = Arc::new(CredentialStore::new(
            key_value_store,
            validator,
            self.store_config,
            self.environment.api_key,
        ));
        let invoker = FailoverInvoker::new(Arc::clone(&store));

        Ok(AppState {
            store,
            invoker,
            client,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
