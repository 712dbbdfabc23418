//! Generation parameters and named looks.

use crate::{GradeError, GradeResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs of the cinematic look pipeline.
///
/// Neutral values (no change) are contrast 1, saturation 1,
/// shadow_lift 0, highlight_roll 1, teal_orange 0, warmth 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    /// Nodes per axis (17, 33, 65 are typical). At least 2.
    pub size: usize,
    /// Gain around mid gray (1.0 = unchanged).
    pub contrast: f64,
    /// Chroma gain around luminance (1.0 = unchanged, < 1 mutes).
    pub saturation: f64,
    /// Fraction of the distance to white added to each channel.
    pub shadow_lift: f64,
    /// Gain applied above mid gray (< 1 compresses highlights).
    pub highlight_roll: f64,
    /// Teal shadows / orange highlights strength (0..1, <= 0 disables).
    pub teal_orange: f64,
    /// Positive warms, negative cools.
    pub warmth: f64,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            size: 33,
            contrast: 1.1,
            saturation: 0.95,
            shadow_lift: 0.02,
            highlight_roll: 0.98,
            teal_orange: 0.3,
            warmth: 0.1,
        }
    }
}

impl GenerationParameters {
    /// Parameters that leave every color unchanged.
    pub fn neutral(size: usize) -> Self {
        Self {
            size,
            contrast: 1.0,
            saturation: 1.0,
            shadow_lift: 0.0,
            highlight_roll: 1.0,
            teal_orange: 0.0,
            warmth: 0.0,
        }
    }

    /// Same parameters at a different cube size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Checks that `size >= 2` and every float knob is finite.
    pub fn validate(&self) -> GradeResult<()> {
        if self.size < 2 {
            return Err(GradeError::Validation(format!("size must be >= 2, got {}", self.size)));
        }
        let knobs = [
            ("contrast", self.contrast),
            ("saturation", self.saturation),
            ("shadow_lift", self.shadow_lift),
            ("highlight_roll", self.highlight_roll),
            ("teal_orange", self.teal_orange),
            ("warmth", self.warmth),
        ];
        for (name, value) in knobs {
            if !value.is_finite() {
                return Err(GradeError::Validation(format!("{} must be finite, got {}", name, value)));
            }
        }
        Ok(())
    }

    /// Loads parameters from a YAML file. Missing fields take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> GradeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Loads parameters from a YAML string and validates them.
    pub fn from_yaml_str(yaml: &str) -> GradeResult<Self> {
        let params: Self = serde_yaml::from_str(yaml)?;
        params.validate()?;
        Ok(params)
    }
}

/// Ready-made looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Balanced film look with a light teal/orange split.
    Classic,
    /// Punchier contrast, muted color, slightly cool.
    Modern,
    /// Gentle contrast, warm cast.
    WarmDrama,
    /// Hard contrast, strong split tone, cold cast.
    CoolThriller,
}

impl Preset {
    /// All presets in a stable order.
    pub const ALL: [Preset; 4] = [Preset::Classic, Preset::Modern, Preset::WarmDrama, Preset::CoolThriller];

    /// Parameters of this look at 33 nodes per axis.
    pub fn params(&self) -> GenerationParameters {
        let (contrast, saturation, shadow_lift, highlight_roll, teal_orange, warmth) = match self {
            Preset::Classic => (1.15, 0.92, 0.015, 0.95, 0.4, 0.05),
            Preset::Modern => (1.2, 0.88, 0.025, 0.92, 0.5, -0.05),
            Preset::WarmDrama => (1.1, 0.95, 0.02, 0.96, 0.2, 0.15),
            Preset::CoolThriller => (1.25, 0.85, 0.01, 0.90, 0.6, -0.1),
        };
        GenerationParameters {
            size: 33,
            contrast,
            saturation,
            shadow_lift,
            highlight_roll,
            teal_orange,
            warmth,
        }
    }

    /// Title written into the `.cube` header.
    pub fn title(&self) -> &'static str {
        match self {
            Preset::Classic => "Original Cinematic Classic",
            Preset::Modern => "Original Cinematic Modern",
            Preset::WarmDrama => "Original Cinematic Warm Drama",
            Preset::CoolThriller => "Original Cinematic Cool Thriller",
        }
    }

    /// File name without extension.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Preset::Classic => "Original_Cinematic_Classic",
            Preset::Modern => "Original_Cinematic_Modern",
            Preset::WarmDrama => "Original_Cinematic_WarmDrama",
            Preset::CoolThriller => "Original_Cinematic_CoolThriller",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for preset in Preset::ALL {
            assert!(preset.params().validate().is_ok(), "{:?}", preset);
        }
    }

    #[test]
    fn size_below_two_rejected() {
        let err = GenerationParameters::neutral(1).validate().unwrap_err();
        assert!(matches!(err, GradeError::Validation(_)));
    }

    #[test]
    fn non_finite_rejected() {
        let mut p = GenerationParameters::default();
        p.warmth = f64::INFINITY;
        assert!(p.validate().unwrap_err().to_string().contains("warmth"));
        p.warmth = 0.0;
        p.saturation = f64::NAN;
        assert!(p.validate().is_err());
    }

    #[test]
    fn yaml_partial() {
        let p = GenerationParameters::from_yaml_str("size: 17\nwarmth: -0.2\n").unwrap();
        assert_eq!(p.size, 17);
        assert_eq!(p.warmth, -0.2);
        assert_eq!(p.contrast, 1.1);
    }

    #[test]
    fn yaml_invalid_size() {
        assert!(matches!(
            GenerationParameters::from_yaml_str("size: 1\n"),
            Err(GradeError::Validation(_))
        ));
    }
}
