//! aversa-core - the unappetizing image filter pipeline.
//!
//! Takes a food photo and deterministically produces a visually aversive
//! version of it: desaturated, contrast-crushed, with an oily yellow-green
//! cast on highlights, a cold stale cast on shadows, and hard edges pushed
//! back up so nothing looks soft. The surrounding application pairs the
//! result with dissuasive text; this crate is only the image transform.
//!
//! # Architecture
//!
//! ```text
//! File -> Validate -> Decode -> Downscale -> Edge map -> Color remap -> JPEG
//! ```
//!
//! The two filter passes (`filter::edge`, `filter::remap`) are pure
//! functions over an owned raster: no I/O, no randomness, no shared state.
//! Given the same input and [`config::FilterConfig`], the output is
//! byte-identical across runs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use aversa_core::{Config, FilterPipeline};
//!
//! #[tokio::main]
//! async fn main() -> aversa_core::Result<()> {
//!     let pipeline = FilterPipeline::new(Config::load()?)?;
//!     let result = pipeline.run("./burger.jpg".as_ref()).await?;
//!     println!("{} bytes of deterrent", result.processed.bytes.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::{Config, FilterConfig};
pub use error::{AversaError, ConfigError, PipelineError, PipelineResult, Result};
pub use output::{OutputFormat, RecordWriter};
pub use pipeline::FilterPipeline;
pub use types::{EncodedImage, FilterRecord, FilterResult, SourceRef};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
