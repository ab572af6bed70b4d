//! Mock provider implementation for testing.

use super::{InlineImage, ProviderError, VisionProvider};
use async_trait::async_trait;

/// Mock vision provider for testing.
///
/// Returns a canned response, an empty response, or a forced failure
/// depending on how it was constructed.
pub struct MockVisionProvider {
    feedback: Option<String>,
    fail: bool,
}

impl MockVisionProvider {
    /// Provider that answers every request with `feedback`.
    pub fn with_feedback(feedback: &str) -> Self {
        Self {
            feedback: Some(feedback.to_string()),
            fail: false,
        }
    }

    /// Provider that answers with whitespace-only text.
    pub fn with_empty_response() -> Self {
        Self {
            feedback: Some("   \n".to_string()),
            fail: false,
        }
    }

    /// Provider whose every call fails.
    pub fn failing() -> Self {
        Self {
            feedback: None,
            fail: true,
        }
    }
}

#[async_trait]
impl VisionProvider for MockVisionProvider {
    async fn describe(
        &self,
        _prompt: &str,
        _image: &InlineImage,
    ) -> Result<Option<String>, ProviderError> {
        if self.fail {
            return Err(ProviderError::ApiError(
                "Mock provider failure".to_string(),
            ));
        }

        // Simulate some processing
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        Ok(self.feedback.clone())
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.fail {
            Err(ProviderError::ApiError(
                "Mock provider failure".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}
