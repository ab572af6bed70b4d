//! HTTP handlers for the AsanaSense service.

use crate::dtos::{FeedbackResponse, HealthResponse, MessageResponse};
use crate::error::AppError;
use crate::startup::AppState;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};

pub async fn root() -> impl IntoResponse {
    Json(MessageResponse {
        message: "AsanaSense API is running!".to_string(),
    })
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "AsanaSense API is running".to_string(),
    })
}

/// Accept a single uploaded pose image and relay the model's feedback.
///
/// Every processing failure (undecodable image, upstream error, empty
/// inference result) surfaces as one error category; the internal cause
/// is only logged.
pub async fn analyze_pose(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| {
            AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
        })?
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No file uploaded")))?;

    // Read the entire upload into memory; the bytes live only for this
    // request and are dropped once the call completes.
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e)))?;

    let feedback = state.relay.analyze(&data).await.map_err(|e| {
        tracing::error!(error = %e, "Error processing image");
        AppError::ImageProcessing(e.to_string())
    })?;

    Ok(Json(FeedbackResponse { feedback }))
}
