//! Per-voxel cinematic look pipeline.
//!
//! Stage order and constants are fixed: previously generated LUTs can
//! only be reproduced by running the same stages in the same order.
//!
//! 1. luminance of the input (kept for split toning)
//! 2. contrast around mid gray with a soft shoulder
//! 3. shadow lift toward white
//! 4. highlight rolloff above mid gray
//! 5. saturation around the re-computed luminance
//! 6. teal/orange split tone
//! 7. warmth
//! 8. clamp to [0, 1]

use crate::GenerationParameters;

/// Rec.709 luma weights.
pub const LUMA_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Mid gray pivot for contrast and rolloff.
pub const PIVOT: f64 = 0.5;

/// Slope applied to contrast excursions beyond the pivot half-range.
pub const CONTRAST_SHOULDER: f64 = 0.8;

/// Teal push into shadows: blue, green.
pub const TEAL_SHADOW: (f64, f64) = (0.05, 0.02);

/// Orange push into highlights: red, green.
pub const ORANGE_HIGHLIGHT: (f64, f64) = (0.04, 0.02);

/// Red/blue offset per unit of warmth.
pub const WARMTH_STEP: f64 = 0.02;

/// Rec.709 luminance.
#[inline]
pub fn luminance(rgb: [f64; 3]) -> f64 {
    LUMA_WEIGHTS[0] * rgb[0] + LUMA_WEIGHTS[1] * rgb[1] + LUMA_WEIGHTS[2] * rgb[2]
}

/// Scales the distance from mid gray, compressing the excess past 0.5.
#[inline]
pub fn apply_contrast(v: f64, contrast: f64) -> f64 {
    let mut x = (v - PIVOT) * contrast;
    if x.abs() > 0.5 {
        x = x.signum() * (0.5 + (x.abs() - 0.5) * CONTRAST_SHOULDER);
    }
    x + PIVOT
}

/// Pulls a value toward white by `lift`, self-limiting near 1.
#[inline]
pub fn apply_shadow_lift(v: f64, lift: f64) -> f64 {
    v + lift * (1.0 - v)
}

/// Scales the part of a value above mid gray.
#[inline]
pub fn apply_highlight_roll(v: f64, roll: f64) -> f64 {
    if v > PIVOT {
        PIVOT + (v - PIVOT) * roll
    } else {
        v
    }
}

/// Scales chroma around the triple's own luminance.
#[inline]
pub fn apply_saturation(rgb: [f64; 3], saturation: f64) -> [f64; 3] {
    // lum + (v - lum) * 1 can differ from v in the last bit
    if saturation == 1.0 {
        return rgb;
    }
    let lum = luminance(rgb);
    rgb.map(|v| lum + (v - lum) * saturation)
}

/// Teal into shadows and orange into highlights, weighted by input luminance.
#[inline]
pub fn apply_split_tone(rgb: [f64; 3], lum: f64, strength: f64) -> [f64; 3] {
    if strength <= 0.0 {
        return rgb;
    }
    let [mut r, mut g, mut b] = rgb;

    let shadow_mask = 1.0 - (lum * 2.0).min(1.0);
    b += strength * TEAL_SHADOW.0 * shadow_mask;
    g += strength * TEAL_SHADOW.1 * shadow_mask;

    let highlight_mask = (lum * 2.0 - 1.0).max(0.0);
    r += strength * ORANGE_HIGHLIGHT.0 * highlight_mask;
    g += strength * ORANGE_HIGHLIGHT.1 * highlight_mask;

    [r, g, b]
}

/// Shifts red against blue.
#[inline]
pub fn apply_warmth(rgb: [f64; 3], warmth: f64) -> [f64; 3] {
    [rgb[0] + warmth * WARMTH_STEP, rgb[1], rgb[2] - warmth * WARMTH_STEP]
}

/// Runs the full pipeline on one normalized input color.
pub fn grade_voxel(input: [f64; 3], p: &GenerationParameters) -> [f64; 3] {
    let lum = luminance(input);

    let rgb = input.map(|v| {
        let v = apply_contrast(v, p.contrast);
        let v = apply_shadow_lift(v, p.shadow_lift);
        apply_highlight_roll(v, p.highlight_roll)
    });
    let rgb = apply_saturation(rgb, p.saturation);
    let rgb = apply_split_tone(rgb, lum, p.teal_orange);
    let rgb = apply_warmth(rgb, p.warmth);

    rgb.map(|v| v.clamp(0.0, 1.0))
}
