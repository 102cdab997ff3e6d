//! Pass 2: per-pixel color remapping.
//!
//! Order matters and is fixed: desaturate, tone shift, contrast, brightness,
//! edge boost, clamp. The tone-shift deltas are product-tuned constants.

use crate::config::FilterConfig;
use crate::filter::luminance;

/// Highlight push per unit of oiliness: yellow-green oily cast.
const HIGHLIGHT_SHIFT: [f32; 3] = [40.0, 35.0, -20.0];

/// Shadow push per unit of coldness: cold, stale cast.
const SHADOW_SHIFT: [f32; 3] = [-15.0, 10.0, 25.0];

/// Midpoint for the contrast adjustment.
const CONTRAST_PIVOT: f32 = 128.0;

/// Remap one pixel's RGB channels. Alpha is handled by the caller and never
/// touched here.
pub fn remap(r: u8, g: u8, b: u8, is_edge: bool, config: &FilterConfig) -> [u8; 3] {
    let lum = luminance(r, g, b);

    // Desaturate toward the channel average.
    let avg = (r as f32 + g as f32 + b as f32) / 3.0;
    let d = config.desaturation;
    let mut channels = [
        r as f32 * (1.0 - d) + avg * d,
        g as f32 * (1.0 - d) + avg * d,
        b as f32 * (1.0 - d) + avg * d,
    ];

    // Tone-dependent shift. The two branches are mutually exclusive and both
    // comparisons are strict: a pixel exactly at a threshold gets no shift.
    if lum > config.highlight_threshold {
        let oiliness = (lum - config.highlight_threshold) / (255.0 - config.highlight_threshold);
        for (c, shift) in channels.iter_mut().zip(HIGHLIGHT_SHIFT) {
            *c += oiliness * shift;
        }
    } else if lum < config.shadow_threshold {
        let coldness = (config.shadow_threshold - lum) / config.shadow_threshold;
        for (c, shift) in channels.iter_mut().zip(SHADOW_SHIFT) {
            *c += coldness * shift;
        }
    }

    for c in channels.iter_mut() {
        *c = (*c - CONTRAST_PIVOT) * config.contrast + CONTRAST_PIVOT;
        *c *= config.brightness;
        if is_edge {
            *c *= config.edge_sharpness;
        }
        *c = c.clamp(0.0, 255.0);
    }

    [
        channels[0].round() as u8,
        channels[1].round() as u8,
        channels[2].round() as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// What a pixel would become if neither tone branch fired.
    fn no_shift_baseline(value: u8, config: &FilterConfig) -> f32 {
        let v = value as f32; // uniform gray: desaturation is a no-op
        ((v - 128.0) * config.contrast + 128.0) * config.brightness
    }

    #[test]
    fn test_highlight_branch_shifts_toward_yellow_green() {
        // Pure white: luminance 255, well above the highlight threshold.
        let config = FilterConfig::default();
        let [r, g, b] = remap(255, 255, 255, false, &config);
        let baseline = no_shift_baseline(255, &config).clamp(0.0, 255.0).round() as u8;

        assert!(r > baseline, "red should rise above the no-shift baseline");
        assert!(g > baseline, "green should rise above the no-shift baseline");
        assert!(b < baseline, "blue should fall below the no-shift baseline");
    }

    #[test]
    fn test_shadow_branch_shifts_toward_blue() {
        // With the default contrast/brightness a (10,10,10) pixel clamps to
        // black either way, so neutralize those two steps to observe the
        // shift itself.
        let config = FilterConfig {
            contrast: 1.0,
            brightness: 1.0,
            ..FilterConfig::default()
        };
        let [r, g, b] = remap(10, 10, 10, false, &config);
        assert!(b > g, "blue should rise above green");
        assert!(g > r, "green should rise above red");
        assert!(b > 10, "blue should rise above the input value");
    }

    #[test]
    fn test_shadow_branch_visible_with_default_config() {
        // (40,40,40) is dark enough to be a shadow but survives the default
        // contrast/brightness without fully clamping.
        let config = FilterConfig::default();
        let [r, g, b] = remap(40, 40, 40, false, &config);
        let baseline = no_shift_baseline(40, &config).clamp(0.0, 255.0).round() as u8;
        assert!(b > baseline);
        assert!(b > g && g > r);
    }

    #[test]
    fn test_pixel_exactly_at_highlight_threshold_gets_no_shift() {
        let config = FilterConfig::default();
        // Gray 180 has luminance exactly 180 = highlight_threshold.
        let expected = no_shift_baseline(180, &config).clamp(0.0, 255.0).round() as u8;
        let [r, g, b] = remap(180, 180, 180, false, &config);
        assert_eq!([r, g, b], [expected; 3]);
    }

    #[test]
    fn test_pixel_exactly_at_shadow_threshold_gets_no_shift() {
        let config = FilterConfig::default();
        let expected = no_shift_baseline(80, &config).clamp(0.0, 255.0).round() as u8;
        let [r, g, b] = remap(80, 80, 80, false, &config);
        assert_eq!([r, g, b], [expected; 3]);
    }

    #[test]
    fn test_edge_boost_applies_only_to_edges() {
        let config = FilterConfig::default();
        // Midtone gray so nothing clamps: 150 -> 158.8 -> 119.1 plain,
        // * 1.2 = 142.92 when boosted.
        let plain = remap(150, 150, 150, false, &config);
        let boosted = remap(150, 150, 150, true, &config);
        assert_eq!(plain, [119; 3]);
        assert_eq!(boosted, [143; 3]);
    }

    #[test]
    fn test_output_always_in_range() {
        // Extreme parameters still produce clamped channels; u8 output makes
        // the upper bound structural, so check the extremes map to 0/255.
        let hot = FilterConfig {
            contrast: 8.0,
            brightness: 4.0,
            edge_sharpness: 5.0,
            ..FilterConfig::default()
        };
        assert_eq!(remap(255, 255, 255, true, &hot), [255, 255, 255]);
        assert_eq!(remap(0, 0, 0, true, &hot), [0, 0, 0]);
    }
}
