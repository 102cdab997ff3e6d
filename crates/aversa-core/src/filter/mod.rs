//! The unappetizing filter: two deterministic passes over an RGBA raster.
//!
//! Pass 1 (**edge**) computes a Sobel gradient-magnitude map over pixel
//! luminance. Pass 2 (**remap**) rewrites every pixel's RGB channels:
//! desaturation, a luminance-dependent tone cast (oily yellow-green in
//! highlights, cold blue in shadows), contrast and brightness remapping, and
//! an edge-sharpness boost where pass 1 found a boundary. Alpha is copied
//! through untouched.
//!
//! `apply` is a pure function: no I/O, no randomness, no shared state. Each
//! invocation allocates its own working buffers, so concurrent invocations
//! are fully independent.

pub mod edge;
pub mod remap;

pub use edge::{detect, EdgeMap};

use image::RgbaImage;

use crate::config::FilterConfig;
use crate::error::PipelineResult;

/// Perceptual luminance of an RGB triple (ITU-R BT.601 weights).
pub(crate) fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Apply the full filter to a raster, returning a new image of the same
/// dimensions. The source is never mutated.
pub fn apply(source: &RgbaImage, config: &FilterConfig) -> PipelineResult<RgbaImage> {
    let (width, height) = source.dimensions();
    let edges = edge::detect(source)?;

    let mut output = RgbaImage::new(width, height);
    for (x, y, pixel) in source.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let is_edge = edges.is_edge(x, y, config.edge_threshold);
        let [nr, ng, nb] = remap::remap(r, g, b, is_edge, config);
        output.put_pixel(x, y, image::Rgba([nr, ng, nb, a]));
    }
    Ok(output)
}
