//! Sub-configuration structs with the product-tuned defaults.

use serde::{Deserialize, Serialize};

/// Numeric parameters of the unappetizing filter.
///
/// The defaults were tuned empirically against food photos and are preserved
/// exactly; a partial `[filter]` table falls back field-by-field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Gradient magnitude above which a pixel counts as an edge
    pub edge_threshold: f32,

    /// Luminance (0-255) above which a pixel is a highlight (oily region)
    pub highlight_threshold: f32,

    /// Luminance (0-255) below which a pixel is a shadow (stale region)
    pub shadow_threshold: f32,

    /// Fraction (0-1) of the way from the original color to gray
    pub desaturation: f32,

    /// Multiplicative contrast factor around the 128 midpoint
    pub contrast: f32,

    /// Multiplicative brightness scale applied after contrast
    pub brightness: f32,

    /// Boost applied to edge pixels after all other adjustments
    pub edge_sharpness: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            edge_threshold: 30.0,
            highlight_threshold: 180.0,
            shadow_threshold: 80.0,
            desaturation: 0.9,
            contrast: 1.4,
            brightness: 0.75,
            edge_sharpness: 1.2,
        }
    }
}

/// Output raster settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Longest edge of the processed image in pixels
    pub max_dimension: u32,

    /// JPEG quality (1-100) for the re-encoded result
    pub jpeg_quality: u8,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_dimension: 800,
            jpeg_quality: 80,
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum source image dimension (width or height)
    pub max_image_dimension: u32,

    /// Decode timeout in milliseconds
    pub decode_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 50,
            max_image_dimension: 10000,
            decode_timeout_ms: 5000,
        }
    }
}

/// Record output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default record format ("json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON records
    pub pretty: bool,

    /// Embed the processed image as a base64 data URL in each record
    pub include_data_url: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: false,
            include_data_url: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
