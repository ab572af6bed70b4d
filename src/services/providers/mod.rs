//! Vision provider abstraction.
//!
//! A trait-based seam between the relay and the external multimodal
//! model, allowing the Gemini backend to be swapped for a mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// A single base64-encoded image with its MIME type, ready for inline
/// transmission to a provider.
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

/// Trait for multimodal providers that describe an image in text.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Generate a free-text description of `image` guided by `prompt`.
    ///
    /// Returns `None` when the model answered without any text part;
    /// the caller decides how to treat that.
    async fn describe(
        &self,
        prompt: &str,
        image: &InlineImage,
    ) -> Result<Option<String>, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
