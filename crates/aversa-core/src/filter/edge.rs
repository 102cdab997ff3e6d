//! Pass 1: Sobel-style edge detection over pixel luminance.

use image::RgbaImage;

use crate::error::PipelineResult;
use crate::filter::luminance;

/// Per-pixel gradient magnitudes for one filter invocation.
///
/// Same dimensions as the raster it was computed from; the 1-pixel border is
/// always 0 so border pixels are never classified as edges. Scoped strictly
/// to the invocation that allocated it.
pub struct EdgeMap {
    magnitudes: Vec<f32>,
    width: u32,
    height: u32,
}

impl EdgeMap {
    /// Gradient magnitude at (x, y).
    pub fn magnitude(&self, x: u32, y: u32) -> f32 {
        self.magnitudes[y as usize * self.width as usize + x as usize]
    }

    /// Whether (x, y) exceeds the edge threshold (strict comparison).
    pub fn is_edge(&self, x: u32, y: u32, threshold: f32) -> bool {
        self.magnitude(x, y) > threshold
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Compute the edge map for a raster.
///
/// For every interior pixel, horizontal and vertical gradients are taken with
/// a 3x3 Sobel kernel over the 8 neighbors' luminance (center excluded), each
/// weighted sum divided by 8; magnitude is `sqrt(gx^2 + gy^2)`. Images
/// narrower or shorter than 3 pixels have no interior and yield an all-zero
/// map.
pub fn detect(image: &RgbaImage) -> PipelineResult<EdgeMap> {
    let (width, height) = image.dimensions();
    let luma = luminance_grid(image)?;
    let mut magnitudes = alloc_zeroed(width, height)?;

    if width >= 3 && height >= 3 {
        let w = width as usize;
        for y in 1..height as usize - 1 {
            for x in 1..w - 1 {
                let tl = luma[(y - 1) * w + (x - 1)];
                let tc = luma[(y - 1) * w + x];
                let tr = luma[(y - 1) * w + (x + 1)];
                let ml = luma[y * w + (x - 1)];
                let mr = luma[y * w + (x + 1)];
                let bl = luma[(y + 1) * w + (x - 1)];
                let bc = luma[(y + 1) * w + x];
                let br = luma[(y + 1) * w + (x + 1)];

                let gx = (-tl + tr - 2.0 * ml + 2.0 * mr - bl + br) / 8.0;
                let gy = (-tl - 2.0 * tc - tr + bl + 2.0 * bc + br) / 8.0;
                magnitudes[y * w + x] = (gx * gx + gy * gy).sqrt();
            }
        }
    }

    Ok(EdgeMap {
        magnitudes,
        width,
        height,
    })
}

/// Precompute luminance for every pixel from the raw RGBA bytes.
fn luminance_grid(image: &RgbaImage) -> PipelineResult<Vec<f32>> {
    let (width, height) = image.dimensions();
    let mut luma = alloc_zeroed(width, height)?;
    for (i, px) in image.as_raw().chunks_exact(4).enumerate() {
        luma[i] = luminance(px[0], px[1], px[2]);
    }
    Ok(luma)
}

/// Allocate a zeroed width*height f32 buffer, surfacing allocation failure
/// instead of aborting on pathological dimensions.
fn alloc_zeroed(width: u32, height: u32) -> PipelineResult<Vec<f32>> {
    use crate::error::PipelineError;

    let len = (width as usize)
        .checked_mul(height as usize)
        .ok_or(PipelineError::Allocation { width, height })?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| PipelineError::Allocation { width, height })?;
    buf.resize(len, 0.0);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gray_image(width: u32, height: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([value, value, value, 255]))
    }

    #[test]
    fn test_uniform_image_has_zero_magnitudes() {
        let img = gray_image(8, 8, 128);
        let map = detect(&img).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(map.magnitude(x, y), 0.0);
            }
        }
    }

    #[test]
    fn test_sharp_boundary_is_elevated() {
        // Columns 0-3 bright, columns 4-7 dark: the vertical boundary must
        // produce magnitudes above the default threshold of 30.
        let mut img = gray_image(8, 8, 150);
        for y in 0..8 {
            for x in 4..8 {
                img.put_pixel(x, y, Rgba([50, 50, 50, 255]));
            }
        }
        let map = detect(&img).unwrap();
        assert!(map.is_edge(3, 4, 30.0));
        assert!(map.is_edge(4, 4, 30.0));
        // Deep inside a flat region there is no gradient.
        assert!(!map.is_edge(1, 4, 30.0));
        assert_eq!(map.magnitude(1, 4), 0.0);
    }

    #[test]
    fn test_border_is_always_zero() {
        let mut img = gray_image(6, 6, 0);
        for y in 0..6 {
            for x in 0..6 {
                if (x + y) % 2 == 0 {
                    img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
                }
            }
        }
        let map = detect(&img).unwrap();
        for x in 0..6 {
            assert_eq!(map.magnitude(x, 0), 0.0);
            assert_eq!(map.magnitude(x, 5), 0.0);
        }
        for y in 0..6 {
            assert_eq!(map.magnitude(0, y), 0.0);
            assert_eq!(map.magnitude(5, y), 0.0);
        }
    }

    #[test]
    fn test_degenerate_dimensions_yield_zero_map() {
        let img = gray_image(2, 8, 200);
        let map = detect(&img).unwrap();
        assert_eq!(map.width(), 2);
        for y in 0..8 {
            assert_eq!(map.magnitude(0, y), 0.0);
            assert_eq!(map.magnitude(1, y), 0.0);
        }
    }

    #[test]
    fn test_horizontal_gradient_magnitude() {
        // Left column 0, middle 0, right 80 in a 3x3: gx at the center is
        // (0 + 80 - 0 + 160 - 0 + 80) / 8 = 40, gy is 0.
        let mut img = gray_image(3, 3, 0);
        for y in 0..3 {
            img.put_pixel(2, y, Rgba([80, 80, 80, 255]));
        }
        let map = detect(&img).unwrap();
        assert!((map.magnitude(1, 1) - 40.0).abs() < 1e-4);
    }
}
