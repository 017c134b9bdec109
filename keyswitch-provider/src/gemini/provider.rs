//! Key validation and `generateContent` calls

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{CredentialValidator, ErrorContext};
use crate::types::{GenerateContentRequest, GenerateContentResponse, Modality};
use crate::utils::log_sanitizer::mask_secret;

use super::{GeminiClient, PROVIDER_NAME, PROXY_CLIENT_HEADER};

#[async_trait]
impl CredentialValidator for GeminiClient {
    /// GET the model listing with the key; any 2xx counts as accepted. Body is ignored.
    async fn validate(&self, secret: &str) -> bool {
        let endpoint = match self.models_endpoint(secret) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                log::error!("[{PROVIDER_NAME}] Cannot build validation URL: {e}");
                return false;
            }
        };

        match HttpUtils::execute_request(
            self.client.get(endpoint.url),
            PROVIDER_NAME,
            "GET",
            &endpoint.label,
        )
        .await
        {
            Ok((status, _)) => {
                let accepted = HttpUtils::is_success(status);
                log::debug!(
                    "[{PROVIDER_NAME}] Validation for {} returned HTTP {status}",
                    mask_secret(secret)
                );
                accepted
            }
            Err(e) => {
                log::error!(
                    "[{PROVIDER_NAME}] API key test failed for {}: {e}",
                    mask_secret(secret)
                );
                false
            }
        }
    }
}

impl GeminiClient {
    /// Call `models/{model}:generateContent` with the given key.
    ///
    /// Goes through the proxy when one is configured. A response whose prompt or first
    /// candidate was blocked is returned as [`ProviderError::ContentBlocked`].
    pub async fn generate_content(
        &self,
        secret: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let endpoint = self.model_endpoint(secret, model, "generateContent")?;
        let body = serde_json::to_string(request).map_err(|e| ProviderError::SerializationError {
            provider: PROVIDER_NAME.to_string(),
            detail: e.to_string(),
        })?;

        let mut builder = self
            .client
            .post(endpoint.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if endpoint.proxied {
            builder = builder.header("x-goog-api-client", PROXY_CLIENT_HEADER);
        }

        let (status, text) =
            HttpUtils::execute_request(builder, PROVIDER_NAME, "POST", &endpoint.label).await?;

        if !HttpUtils::is_success(status) {
            return Err(self.error_from_response(
                &text,
                ErrorContext {
                    model: Some(model.to_string()),
                    http_status: Some(status),
                },
            ));
        }

        let response: GenerateContentResponse = HttpUtils::parse_json(&text, PROVIDER_NAME)?;
        if let Some(reason) = response.block_reason() {
            return Err(ProviderError::ContentBlocked {
                provider: PROVIDER_NAME.to_string(),
                reason: reason.to_string(),
            });
        }
        Ok(response)
    }

    /// Text-only generation; fails with [`ProviderError::EmptyResponse`] when no text came back.
    pub async fn generate_text(&self, secret: &str, model: &str, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::from_prompt(prompt);
        self.generate_content(secret, model, &request)
            .await?
            .text()
            .ok_or_else(|| ProviderError::EmptyResponse {
                provider: PROVIDER_NAME.to_string(),
                expected: "text".to_string(),
            })
    }

    /// Image generation through `generateContent`; returns at most `limit` `data:` URLs.
    pub async fn generate_images(
        &self,
        secret: &str,
        model: &str,
        request: GenerateContentRequest,
        limit: usize,
    ) -> Result<Vec<String>> {
        let request = request.with_modalities(vec![Modality::Image, Modality::Text]);
        let mut images = self
            .generate_content(secret, model, &request)
            .await?
            .image_data_urls();
        if images.is_empty() {
            return Err(ProviderError::EmptyResponse {
                provider: PROVIDER_NAME.to_string(),
                expected: "images".to_string(),
            });
        }
        images.truncate(limit);
        Ok(images)
    }
}
