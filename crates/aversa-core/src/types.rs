//! Core data types for the aversa filter pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The encoded, filtered image produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// Encoded bytes (JPEG at the configured quality)
    pub bytes: Vec<u8>,

    /// Width after downscaling
    pub width: u32,

    /// Height after downscaling
    pub height: u32,

    /// Encoding format ("jpeg")
    pub format: String,
}

/// Opaque reference to the pristine source image.
///
/// The source is never mutated; this is what callers use for side-by-side
/// preview and deduplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    /// Path to the source file
    pub path: PathBuf,

    /// Just the filename portion
    pub file_name: String,

    /// BLAKE3 hash of the source bytes
    pub content_hash: String,

    /// Detected source format ("jpeg", "png", ...)
    pub format: String,

    /// Source width in pixels
    pub width: u32,

    /// Source height in pixels
    pub height: u32,

    /// Source file size in bytes
    pub file_size: u64,
}

/// Output of one filter invocation: the processed image plus an untouched
/// reference to the original. Held by the caller for a session, discarded
/// when a new image comes in.
#[derive(Debug, Clone)]
pub struct FilterResult {
    /// The filtered, re-encoded image
    pub processed: EncodedImage,

    /// Reference to the unprocessed source
    pub original: SourceRef,
}

/// Serializable record of one pipeline run, emitted by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRecord {
    /// Reference to the unprocessed source
    pub original: SourceRef,

    /// Processed width in pixels
    pub width: u32,

    /// Processed height in pixels
    pub height: u32,

    /// Encoding format of the processed image
    pub format: String,

    /// Where the processed image was written, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    /// Processed image as a base64 data URL, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
}

impl FilterRecord {
    /// Build a record from a pipeline result.
    pub fn from_result(result: &FilterResult) -> Self {
        Self {
            original: result.original.clone(),
            width: result.processed.width,
            height: result.processed.height,
            format: result.processed.format.clone(),
            output_path: None,
            data_url: None,
        }
    }
}
