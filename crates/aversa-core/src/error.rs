//! Error types for the aversa filter pipeline.
//!
//! Errors are organized by stage so callers can tell a bad config apart from
//! a bad image. Every failure is fatal for its invocation: the pipeline never
//! returns a partially filtered image and never retries internally.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for aversa operations.
#[derive(Error, Debug)]
pub enum AversaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A configuration value is outside its documented domain
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// JPEG encoding of the filtered raster failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// Decode did not finish within the configured timeout
    #[error("Timeout decoding {path} after {timeout_ms}ms")]
    Timeout { path: PathBuf, timeout_ms: u64 },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Edge detection needs a 1-pixel border plus interior
    #[error("Image too small: {path} ({width}x{height}, minimum 3x3)")]
    ImageTooSmall {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    /// Buffer allocation failed for a pathologically large raster
    #[error("Failed to allocate {width}x{height} working buffer")]
    Allocation { width: u32, height: u32 },

    /// Unsupported image format
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// Convenience type alias for aversa results.
pub type Result<T> = std::result::Result<T, AversaError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
