//! # keyswitch-provider
//!
//! Thin client glue for the Generative Language API, written to be driven by a
//! key-failover layer: no call holds on to a key, every call takes the key to use.
//!
//! ## What lives here
//!
//! - [`GeminiClient`] — endpoint selection (direct or through a proxy), the
//!   `generateContent` call, and key validation
//!   ([`CredentialValidator`]).
//! - [`ProviderError`] — structured errors whose `Display` keeps the raw API message.
//! - [`FailureKind`] — best-effort, message-based classification of a final failure
//!   into a user-facing category.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use keyswitch_provider::{CredentialValidator, GeminiClient, ProviderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiClient::new(ProviderConfig::default())?;
//!
//!     // 1. Check the key against the model listing endpoint
//!     if !client.validate("your-api-key").await {
//!         eprintln!("key rejected");
//!         return Ok(());
//!     }
//!
//!     // 2. Generate
//!     let text = client
//!         .generate_text("your-api-key", "gemini-2.5-flash", "Say hello")
//!         .await?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! - [`ProviderError::InvalidCredentials`] — the key was rejected
//! - [`ProviderError::QuotaExceeded`] / [`ProviderError::RateLimited`] — quota or throttling
//! - [`ProviderError::ContentBlocked`] — safety filters
//! - [`ProviderError::NetworkError`] / [`ProviderError::Timeout`] — transport
//!
//! Nothing in this crate retries. Trying the next key is the caller's job.

mod config;
mod error;
mod gemini;
mod http_client;
mod traits;
mod types;
mod utils;

pub use config::{DEFAULT_API_BASE, ProviderConfig};
pub use error::{FailureKind, ProviderError, Result};
pub use gemini::GeminiClient;
pub use traits::CredentialValidator;
pub use types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData,
    Modality, Part, PromptFeedback, ResponseCandidate,
};
pub use utils::log_sanitizer::{mask_secret, truncate_for_log};
