//! Filter pipeline stages.
//!
//! - **validate**: pre-decode file checks (existence, size, magic bytes)
//! - **decode**: bytes to an RGBA raster, with limits and a timeout
//! - **downscale**: aspect-preserving fit inside the maximum dimension
//! - **encode**: JPEG output at the configured quality
//! - **hash**: content hash of the pristine source
//! - **processor**: orchestrates the full run

pub mod decode;
pub mod downscale;
pub mod encode;
pub mod hash;
pub mod processor;
pub mod validate;

// Re-exports for convenient access
pub use decode::{format_to_string, DecodedImage, ImageDecoder};
pub use downscale::Downscaler;
pub use encode::{to_data_url, Encoder};
pub use processor::FilterPipeline;
pub use validate::Validator;
