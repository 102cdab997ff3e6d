//! JPEG encoding of the filtered raster.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::RgbaImage;
use std::io::Cursor;

use crate::config::ProcessingConfig;
use crate::error::PipelineError;

/// Encodes filtered rasters at the configured quality.
pub struct Encoder {
    quality: u8,
}

impl Encoder {
    /// Create an encoder from processing settings.
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            quality: config.jpeg_quality,
        }
    }

    /// Encode a raster as JPEG. JPEG carries no alpha channel, so the image
    /// is flattened to RGB first; the raster itself keeps its alpha.
    pub fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, PipelineError> {
        let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();
        let mut buffer = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
        rgb.write_with_encoder(encoder)
            .map_err(|e| PipelineError::Encode(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

/// Render encoded JPEG bytes as a base64 data URL, the form the surrounding
/// application displays and ships to its vision endpoint.
pub fn to_data_url(bytes: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", BASE64.encode(bytes))
}
