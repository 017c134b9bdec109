//! Endpoint selection (direct vs. proxied)

use url::Url;

use crate::error::{ProviderError, Result};

use super::{GeminiClient, PROVIDER_NAME};

/// A fully built request URL plus what may be logged about it.
pub(crate) struct Endpoint {
    pub url: Url,
    /// Secret-free description for logs.
    pub label: String,
    pub proxied: bool,
}

/// Join a base URL and a path without doubling or dropping the slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Parse `raw` and set its `key` query parameter, replacing any existing one.
fn with_key(raw: &str, secret: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|e| ProviderError::InvalidEndpoint {
        provider: PROVIDER_NAME.to_string(),
        detail: format!("{raw}: {e}"),
    })?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "key")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("key", secret);
    Ok(url)
}

impl GeminiClient {
    /// Model listing endpoint used for key validation. Always direct.
    pub(crate) fn models_endpoint(&self, secret: &str) -> Result<Endpoint> {
        let raw = join_url(&self.config.api_base, "/v1beta/models");
        Ok(Endpoint {
            url: with_key(&raw, secret)?,
            label: raw,
            proxied: false,
        })
    }

    /// `models/{model}:{method}` on the proxy when configured, otherwise on the API host.
    pub(crate) fn model_endpoint(&self, secret: &str, model: &str, method: &str) -> Result<Endpoint> {
        let (raw, proxied) = match self.config.proxy_url.as_deref() {
            Some(proxy) => (join_url(proxy, &format!("/v1/models/{model}:{method}")), true),
            None => (
                join_url(
                    &self.config.api_base,
                    &format!("/v1beta/models/{model}:{method}"),
                ),
                false,
            ),
        };
        Ok(Endpoint {
            url: with_key(&raw, secret)?,
            label: raw,
            proxied,
        })
    }
}
