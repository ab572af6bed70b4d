//! Integration tests for `POST /analyze`.
//!
//! The external model is non-deterministic, so these tests never assert
//! feedback text equality against a real model; they drive the service
//! through a mock provider and check the response contract.

use asana_service::config::AsanaConfig;
use asana_service::services::providers::mock::MockVisionProvider;
use asana_service::services::providers::VisionProvider;
use asana_service::startup::Application;
use axum::http::StatusCode;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use reqwest::multipart;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

/// Spawn the application on a random port with the given provider.
async fn spawn_app(provider: Arc<dyn VisionProvider>) -> u16 {
    std::env::set_var("GOOGLE_API_KEY", "test-api-key");
    std::env::set_var("APP__PORT", "0");

    let mut config = AsanaConfig::load().expect("Failed to load config");
    config.common.port = 0;

    let app = Application::build_with_provider(config, provider)
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

async fn post_upload(port: u16, bytes: Vec<u8>, file_name: &str, mime: &str) -> reqwest::Response {
    let form = multipart::Form::new().part(
        "file",
        multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .unwrap(),
    );

    reqwest::Client::new()
        .post(format!("http://127.0.0.1:{}/analyze", port))
        .multipart(form)
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to execute request")
}

fn jpeg_pose_image() -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(500, 500, Rgb([190, 150, 110])));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .unwrap();
    buffer
}

fn png_with_alpha() -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(120, 120, Rgba([90, 60, 40, 128])));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

#[tokio::test]
async fn analyze_returns_feedback_for_valid_jpeg() {
    let port = spawn_app(Arc::new(MockVisionProvider::with_feedback(
        "A solid mountain pose. Ground through all four corners of your feet.",
    )))
    .await;

    let response = post_upload(port, jpeg_pose_image(), "pose.jpg", "image/jpeg").await;

    assert_eq!(StatusCode::OK, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let feedback = body["feedback"].as_str().expect("feedback is not a string");
    assert!(!feedback.trim().is_empty());
}

#[tokio::test]
async fn analyze_accepts_png_with_alpha_channel() {
    let port = spawn_app(Arc::new(MockVisionProvider::with_feedback(
        "Nice tree pose. Soften your standing knee.",
    )))
    .await;

    let response = post_upload(port, png_with_alpha(), "pose.png", "image/png").await;

    assert_eq!(StatusCode::OK, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(!body["feedback"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn analyze_rejects_zero_byte_upload() {
    let port = spawn_app(Arc::new(MockVisionProvider::with_feedback("unused"))).await;

    let response = post_upload(port, Vec::new(), "empty.jpg", "image/jpeg").await;

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let detail = body["detail"].as_str().expect("detail is not a string");
    assert!(detail.contains("Error processing image"));
}

#[tokio::test]
async fn analyze_rejects_non_image_bytes() {
    let port = spawn_app(Arc::new(MockVisionProvider::with_feedback("unused"))).await;

    let response = post_upload(
        port,
        b"this is not an image at all".to_vec(),
        "pose.jpg",
        "image/jpeg",
    )
    .await;

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Error processing image"));
}

#[tokio::test]
async fn analyze_never_returns_blank_feedback() {
    // A provider answering with whitespace-only text must surface as an
    // error, not as a 200 with an empty feedback string.
    let port = spawn_app(Arc::new(MockVisionProvider::with_empty_response())).await;

    let response = post_upload(port, jpeg_pose_image(), "pose.jpg", "image/jpeg").await;

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Error processing image"));
}

#[tokio::test]
async fn analyze_surfaces_upstream_failure_as_server_error() {
    let port = spawn_app(Arc::new(MockVisionProvider::failing())).await;

    let response = post_upload(port, jpeg_pose_image(), "pose.jpg", "image/jpeg").await;

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Error processing image"));
}

#[tokio::test]
async fn analyze_without_file_field_is_a_bad_request() {
    let port = spawn_app(Arc::new(MockVisionProvider::with_feedback("unused"))).await;

    let form = multipart::Form::new();
    let response = reqwest::Client::new()
        .post(format!("http://127.0.0.1:{}/analyze", port))
        .multipart(form)
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
}
