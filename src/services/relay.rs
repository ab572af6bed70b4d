//! The pose-feedback relay.
//!
//! A stateless request/response pipeline: normalize the uploaded image,
//! submit it with the instructional prompt to the vision provider, and
//! map the outcome. Exactly one result (success or failure) is produced
//! per upload; there is no retry and no streaming.

use crate::services::providers::{ProviderError, VisionProvider};
use image::ImageError;
use std::sync::Arc;
use thiserror::Error;

/// Instruction template sent alongside every pose image.
const POSE_FEEDBACK_PROMPT: &str = "\
Analyze this yoga pose image and provide:
1. The name of the yoga pose (if recognizable)
2. Detailed posture feedback including:
   - Alignment corrections needed
   - Breathing suggestions
   - Common mistakes to avoid
   - Tips for improvement

Keep the feedback encouraging, specific, and actionable.
If this is not a recognizable yoga pose, provide general posture feedback.

Format your response as a single paragraph that flows naturally when spoken aloud.";

/// Internal failure taxonomy of a single analyze call. All variants are
/// collapsed into one surfaced error category at the handler boundary.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("invalid image data: {0}")]
    Decode(#[from] ImageError),

    #[error(transparent)]
    Upstream(#[from] ProviderError),

    #[error("empty inference result")]
    EmptyResult,
}

/// Relays an uploaded pose image to the vision provider and returns the
/// model's feedback text. Holds no state across calls.
#[derive(Clone)]
pub struct PoseFeedbackRelay {
    provider: Arc<dyn VisionProvider>,
}

impl PoseFeedbackRelay {
    pub fn new(provider: Arc<dyn VisionProvider>) -> Self {
        Self { provider }
    }

    /// Analyze a single uploaded image and return trimmed feedback text.
    pub async fn analyze(&self, image_bytes: &[u8]) -> Result<String, RelayError> {
        let payload = crate::services::image::normalize(image_bytes)?;

        let text = self
            .provider
            .describe(POSE_FEEDBACK_PROMPT, &payload)
            .await?;

        match text {
            Some(t) if !t.trim().is_empty() => Ok(t.trim().to_string()),
            _ => Err(RelayError::EmptyResult),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockVisionProvider;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn sample_jpeg() -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(48, 48, Rgb([180, 140, 100])));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
            .unwrap();
        buffer
    }

    #[tokio::test]
    async fn returns_trimmed_feedback_on_success() {
        let relay = PoseFeedbackRelay::new(Arc::new(MockVisionProvider::with_feedback(
            "  Nice mountain pose. Keep your shoulders relaxed.  ",
        )));

        let feedback = relay.analyze(&sample_jpeg()).await.unwrap();
        assert_eq!(feedback, "Nice mountain pose. Keep your shoulders relaxed.");
    }

    #[tokio::test]
    async fn maps_blank_model_text_to_empty_result() {
        let relay =
            PoseFeedbackRelay::new(Arc::new(MockVisionProvider::with_empty_response()));

        let err = relay.analyze(&sample_jpeg()).await.unwrap_err();
        assert!(matches!(err, RelayError::EmptyResult));
    }

    #[tokio::test]
    async fn maps_provider_failure_to_upstream_error() {
        let relay = PoseFeedbackRelay::new(Arc::new(MockVisionProvider::failing()));

        let err = relay.analyze(&sample_jpeg()).await.unwrap_err();
        assert!(matches!(err, RelayError::Upstream(_)));
    }

    #[tokio::test]
    async fn rejects_undecodable_bytes_before_calling_provider() {
        // The failing provider would error if reached; decode must fail first.
        let relay = PoseFeedbackRelay::new(Arc::new(MockVisionProvider::failing()));

        let err = relay.analyze(b"not an image").await.unwrap_err();
        assert!(matches!(err, RelayError::Decode(_)));
    }
}
