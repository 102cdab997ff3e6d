//! Pipeline orchestration - wires together all processing stages.

use std::path::Path;

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::filter;
use crate::types::{EncodedImage, FilterResult, SourceRef};

use super::decode::{format_to_string, ImageDecoder};
use super::downscale::Downscaler;
use super::encode::Encoder;
use super::hash;
use super::validate::Validator;

/// The filter pipeline: validate, decode, downscale, filter, encode.
///
/// Construction validates the filter configuration once; after that every
/// `run` is an independent, side-effect-free computation over its own
/// buffers. Instances are safe to share across concurrent invocations.
pub struct FilterPipeline {
    validator: Validator,
    decoder: ImageDecoder,
    downscaler: Downscaler,
    encoder: Encoder,
    config: Config,
}

impl FilterPipeline {
    /// Create a pipeline with the given configuration.
    ///
    /// Fails if any filter parameter is non-finite or outside its domain.
    pub fn new(config: Config) -> Result<Self> {
        config.filter.validate()?;
        Ok(Self {
            validator: Validator::new(config.limits.clone()),
            decoder: ImageDecoder::new(config.limits.clone()),
            downscaler: Downscaler::new(&config.processing),
            encoder: Encoder::new(&config.processing),
            config,
        })
    }

    /// Get a reference to the pipeline configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline on a source file.
    ///
    /// Any failure aborts the whole run; there is never a partial image and
    /// the source file is never modified.
    pub async fn run(&self, path: &Path) -> Result<FilterResult> {
        let start = std::time::Instant::now();
        tracing::debug!("Processing: {:?}", path);

        self.validator.validate(path)?;

        // Read once; hashing and decoding share the same bytes.
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot read file: {}", e),
            })?;
        let file_size = bytes.len() as u64;
        let content_hash = hash::content_hash(&bytes);

        let decode_start = std::time::Instant::now();
        let decoded = self.decoder.decode_from_bytes(bytes, path).await?;
        tracing::trace!("  Decode: {:?}", decode_start.elapsed());

        let filter_start = std::time::Instant::now();
        let raster = self.downscaler.fit(decoded.image);
        let (width, height) = raster.dimensions();
        let filtered = filter::apply(&raster, &self.config.filter)?;
        tracing::trace!("  Filter: {:?}", filter_start.elapsed());

        let encode_start = std::time::Instant::now();
        let encoded = self.encoder.encode(&filtered)?;
        tracing::trace!("  Encode: {:?}", encode_start.elapsed());

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        tracing::debug!(
            "Processed {:?} in {:?} ({}x{} -> {}x{})",
            file_name,
            start.elapsed(),
            decoded.width,
            decoded.height,
            width,
            height
        );

        Ok(FilterResult {
            processed: EncodedImage {
                bytes: encoded,
                width,
                height,
                format: "jpeg".to_string(),
            },
            original: SourceRef {
                path: path.to_path_buf(),
                file_name,
                content_hash,
                format: format_to_string(decoded.format),
                width: decoded.width,
                height: decoded.height,
                file_size,
            },
        })
    }
}
