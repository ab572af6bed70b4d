use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Feedback produced for a single uploaded pose image. Never persisted;
/// lives only for the duration of the response.
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}
