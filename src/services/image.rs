//! Image normalization.
//!
//! Uploads arrive in whatever raster encoding the client produced. Before
//! transmission upstream they are flattened to 3-channel RGB and
//! re-encoded as a single base64 JPEG payload.

use crate::services::providers::InlineImage;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// MIME type of the normalized payload.
pub const NORMALIZED_MIME_TYPE: &str = "image/jpeg";

/// Decode arbitrary raster bytes and normalize them into a base64 JPEG
/// inline payload. Transparency is discarded.
pub fn normalize(bytes: &[u8]) -> Result<InlineImage, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;

    // Force 3-channel color; alpha is dropped here
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());

    let mut buffer = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)?;

    Ok(InlineImage {
        mime_type: NORMALIZED_MIME_TYPE.to_string(),
        data: STANDARD.encode(&buffer),
    })
}
