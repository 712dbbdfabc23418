//! Analyzer configuration.
//!
//! Every keyword list and threshold the analyzer uses lives here and is
//! passed in explicitly. The defaults reproduce the classic cinematic
//! corpus survey; all of them can be overridden from YAML:
//!
//! ```yaml
//! keywords: [cine, film, noir]
//! max_per_dir: 3
//! saturation_sampling:
//!   stride: 4
//! temperature:
//!   warm: 0.05
//! ```

use crate::{AnalyzeError, AnalyzeResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Directory-name keywords that mark a folder as cinematic.
pub const DEFAULT_KEYWORDS: &[&str] = &["cine", "film", "movie", "drama", "hollywood", "cinema"];

/// Default LUT file extension.
pub const DEFAULT_EXTENSION: &str = "cube";

/// Default per-directory file cap.
pub const DEFAULT_MAX_PER_DIR: usize = 5;

/// Full analyzer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Case-insensitive substrings matched against directory names.
    pub keywords: Vec<String>,
    /// LUT file extension without the dot, matched case-insensitively.
    pub extension: String,
    /// Maximum number of files loaded from each directory.
    pub max_per_dir: usize,
    /// Voxel subset used for the saturation estimate.
    pub saturation_sampling: SaturationSampling,
    /// Color temperature classification thresholds.
    pub temperature: TemperatureThresholds,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            extension: DEFAULT_EXTENSION.to_string(),
            max_per_dir: DEFAULT_MAX_PER_DIR,
            saturation_sampling: SaturationSampling::default(),
            temperature: TemperatureThresholds::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> AnalyzeResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| AnalyzeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Loads configuration from a YAML string. Missing fields take defaults.
    pub fn from_yaml_str(yaml: &str) -> AnalyzeResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can drive an analysis.
    pub fn validate(&self) -> AnalyzeResult<()> {
        if self.saturation_sampling.stride == 0 {
            return Err(AnalyzeError::InvalidConfig("saturation_sampling.stride must be > 0".into()));
        }
        let s = &self.saturation_sampling;
        let t = &self.temperature;
        if !(s.min_input_spread.is_finite() && t.warm.is_finite() && t.cool.is_finite()) {
            return Err(AnalyzeError::InvalidConfig("thresholds must be finite".into()));
        }
        if self.extension.is_empty() {
            return Err(AnalyzeError::InvalidConfig("extension must not be empty".into()));
        }
        Ok(())
    }
}

/// Systematic voxel subsample used to estimate saturation change.
///
/// Along each axis the policy visits `start, start + stride, ...`,
/// stopping before the last node when `exclude_boundary` is set. With the
/// defaults (`start = 1`, `stride = 2`, boundary excluded) a 33-point cube
/// is probed at indices 1, 3, ..., 31 on every axis, 16^3 voxels in total.
///
/// Voxels whose identity color has a channel spread below
/// `min_input_spread` (near-gray inputs) are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturationSampling {
    /// First index visited on each axis.
    pub start: usize,
    /// Step between visited indices.
    pub stride: usize,
    /// Skip the outer ring of the cube (index `size - 1`).
    pub exclude_boundary: bool,
    /// Minimum identity spread for a voxel to count.
    pub min_input_spread: f64,
}

impl Default for SaturationSampling {
    fn default() -> Self {
        Self {
            start: 1,
            stride: 2,
            exclude_boundary: true,
            min_input_spread: 0.01,
        }
    }
}

impl SaturationSampling {
    /// Grid indices visited on one axis of a `size`-node cube.
    pub fn axis_indices(&self, size: usize) -> impl Iterator<Item = usize> + Clone {
        let end = if self.exclude_boundary {
            size.saturating_sub(1)
        } else {
            size
        };
        (self.start..end).step_by(self.stride.max(1))
    }
}

/// Thresholds on `R - B` at the cube center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureThresholds {
    /// `R - B` above this is warm.
    pub warm: f64,
    /// `R - B` below minus this is cool.
    pub cool: f64,
}

impl Default for TemperatureThresholds {
    fn default() -> Self {
        Self { warm: 0.03, cool: 0.03 }
    }
}
