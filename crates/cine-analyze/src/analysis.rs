//! Per-LUT characterization.
//!
//! Each LUT is compared against the identity cube of the same size. The
//! identity value of a node is computed on the fly from its coordinates,
//! so concurrent analyses share nothing.

use crate::stats::{mean, Summary};
use crate::AnalyzerConfig;
use cine_lut::{grid_coord, Lut3D};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse white-balance tendency of a LUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTemperature {
    /// Red exceeds blue at mid gray.
    Warm,
    /// Blue exceeds red at mid gray.
    Cool,
    /// Neither dominates.
    Neutral,
}

impl ColorTemperature {
    /// Classifies a mid-gray output by its `R - B` difference.
    pub fn classify(rgb: [f64; 3], thresholds: &crate::TemperatureThresholds) -> Self {
        let rb = rgb[0] - rgb[2];
        if rb > thresholds.warm {
            Self::Warm
        } else if rb < -thresholds.cool {
            Self::Cool
        } else {
            Self::Neutral
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for ColorTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shift statistics of one channel against identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    /// Mean of `output - identity`.
    pub mean_shift: f64,
    /// Population standard deviation of the shift.
    pub std: f64,
    /// Most negative shift.
    pub min_shift: f64,
    /// Most positive shift.
    pub max_shift: f64,
}

impl From<Summary> for ChannelStats {
    fn from(s: Summary) -> Self {
        Self {
            mean_shift: s.mean,
            std: s.std,
            min_shift: s.min,
            max_shift: s.max,
        }
    }
}

/// Characteristics of a single LUT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// File name the LUT came from.
    pub filename: String,
    /// Cube size.
    pub size: usize,
    /// Red channel shift.
    pub r: ChannelStats,
    /// Green channel shift.
    pub g: ChannelStats,
    /// Blue channel shift.
    pub b: ChannelStats,
    /// Standard deviation of every output value, a dynamic-range proxy.
    pub contrast: f64,
    /// Mean output/input channel-spread ratio over the sampled voxels.
    pub saturation_boost: f64,
    /// White-balance tendency at mid gray.
    pub color_temperature: ColorTemperature,
    /// Mean output value in the darkest corner of the cube.
    pub shadow_lift: f64,
    /// Mean output value in the brightest corner of the cube.
    pub highlight_roll: f64,
}

impl AnalysisResult {
    /// Channel stats by index (0 = R, 1 = G, 2 = B).
    pub fn channel(&self, i: usize) -> &ChannelStats {
        match i {
            0 => &self.r,
            1 => &self.g,
            _ => &self.b,
        }
    }
}

/// Characterizes `lut` against the identity transform.
pub fn analyze(lut: &Lut3D, filename: &str, config: &AnalyzerConfig) -> AnalysisResult {
    let size = lut.size();
    let entries = lut.entry_count();

    let mut diffs: [Vec<f64>; 3] = std::array::from_fn(|_| Vec::with_capacity(entries));
    let mut all_values = Vec::with_capacity(entries * 3);
    for (k, out) in lut.data().iter().enumerate() {
        let ident = identity_at(lut, k);
        for c in 0..3 {
            diffs[c].push(out[c] - ident[c]);
            all_values.push(out[c]);
        }
    }

    // entries >= 1, so every summary exists
    let channel = |c: usize| -> ChannelStats {
        Summary::of(&diffs[c])
            .map(ChannelStats::from)
            .unwrap_or(ChannelStats { mean_shift: 0.0, std: 0.0, min_shift: 0.0, max_shift: 0.0 })
    };
    let contrast = Summary::of(&all_values).map(|s| s.std).unwrap_or(0.0);

    let center = size / 2;
    let color_temperature = ColorTemperature::classify(lut.get(center, center, center), &config.temperature);

    AnalysisResult {
        filename: filename.to_string(),
        size,
        r: channel(0),
        g: channel(1),
        b: channel(2),
        contrast,
        saturation_boost: saturation_boost(lut, config),
        color_temperature,
        shadow_lift: shadow_lift(lut),
        highlight_roll: highlight_roll(lut),
    }
}

/// Mean ratio of output to input channel spread over the sampling policy.
///
/// Returns 1.0 when no sampled voxel has enough input spread.
pub fn saturation_boost(lut: &Lut3D, config: &AnalyzerConfig) -> f64 {
    let size = lut.size();
    let policy = &config.saturation_sampling;
    let axis = policy.axis_indices(size);

    let mut ratios = Vec::new();
    for r in axis.clone() {
        for g in axis.clone() {
            for b in axis.clone() {
                let ident = [grid_coord(r, size), grid_coord(g, size), grid_coord(b, size)];
                let input_spread = spread(ident);
                if input_spread >= policy.min_input_spread {
                    ratios.push(spread(lut.get(r, g, b)) / input_spread);
                }
            }
        }
    }
    mean(&ratios).unwrap_or(1.0)
}

/// Mean of every channel value where all three indices are below `size / 4`.
///
/// Cubes smaller than 4 nodes fall back to the black corner node alone.
pub fn shadow_lift(lut: &Lut3D) -> f64 {
    let end = (lut.size() / 4).max(1);
    region_mean(lut, 0, end)
}

/// Mean of every channel value where all three indices are at least `3 * size / 4`.
pub fn highlight_roll(lut: &Lut3D) -> f64 {
    let size = lut.size();
    let start = (3 * size / 4).min(size - 1);
    region_mean(lut, start, size)
}

fn region_mean(lut: &Lut3D, start: usize, end: usize) -> f64 {
    let mut values = Vec::new();
    for b in start..end {
        for g in start..end {
            for r in start..end {
                values.extend_from_slice(&lut.get(r, g, b));
            }
        }
    }
    mean(&values).unwrap_or(0.0)
}

fn identity_at(lut: &Lut3D, k: usize) -> [f64; 3] {
    let size = lut.size();
    let (r, g, b) = lut.coords(k);
    [grid_coord(r, size), grid_coord(g, size), grid_coord(b, size)]
}

fn spread(rgb: [f64; 3]) -> f64 {
    let max = rgb[0].max(rgb[1]).max(rgb[2]);
    let min = rgb[0].min(rgb[1]).min(rgb[2]);
    max - min
}
