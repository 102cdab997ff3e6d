//! Aspect-preserving downscale to a bounded dimension.

use image::imageops::FilterType;
use image::RgbaImage;

use crate::config::ProcessingConfig;

/// Fits rasters inside the configured maximum dimension.
pub struct Downscaler {
    max_dimension: u32,
}

impl Downscaler {
    /// Create a downscaler from processing settings.
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            max_dimension: config.max_dimension,
        }
    }

    /// Downscale so that `max(width, height) <= max_dimension`, preserving
    /// aspect ratio. Images already inside the bound are returned unchanged;
    /// the pipeline never upscales.
    pub fn fit(&self, image: RgbaImage) -> RgbaImage {
        let (width, height) = image.dimensions();
        if width <= self.max_dimension && height <= self.max_dimension {
            return image;
        }
        let (w, h) = self.scaled(width, height);
        image::imageops::resize(&image, w, h, FilterType::Triangle)
    }

    /// Target dimensions for an oversized raster.
    fn scaled(&self, width: u32, height: u32) -> (u32, u32) {
        let ratio = f64::from(self.max_dimension) / f64::from(width.max(height));
        let w = (f64::from(width) * ratio).round().max(1.0) as u32;
        let h = (f64::from(height) * ratio).round().max(1.0) as u32;
        (w.min(self.max_dimension), h.min(self.max_dimension))
    }
}
