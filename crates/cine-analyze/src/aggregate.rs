//! Corpus-wide aggregation of per-LUT results.

use crate::stats::Summary;
use crate::{AnalysisResult, AnalyzeError, AnalyzeResult, ColorTemperature};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Histogram of color temperature classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureDistribution {
    /// Number of warm LUTs.
    pub warm: usize,
    /// Number of cool LUTs.
    pub cool: usize,
    /// Number of neutral LUTs.
    pub neutral: usize,
}

impl TemperatureDistribution {
    /// Counts one more LUT of the given class.
    pub fn record(&mut self, t: ColorTemperature) {
        match t {
            ColorTemperature::Warm => self.warm += 1,
            ColorTemperature::Cool => self.cool += 1,
            ColorTemperature::Neutral => self.neutral += 1,
        }
    }

    /// Count for one class.
    pub fn count(&self, t: ColorTemperature) -> usize {
        match t {
            ColorTemperature::Warm => self.warm,
            ColorTemperature::Cool => self.cool,
            ColorTemperature::Neutral => self.neutral,
        }
    }
}

/// Common traits of an analyzed corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateCharacteristics {
    /// Mean red shift across LUTs.
    pub r_shift: Summary,
    /// Mean green shift across LUTs.
    pub g_shift: Summary,
    /// Mean blue shift across LUTs.
    pub b_shift: Summary,
    /// Contrast metric across LUTs.
    pub contrast: Summary,
    /// Saturation boost across LUTs.
    pub saturation: Summary,
    /// Shadow lift across LUTs.
    pub shadow_lift: Summary,
    /// Highlight roll across LUTs.
    pub highlight_roll: Summary,
    /// How many LUTs fell in each temperature class.
    pub color_temp_distribution: TemperatureDistribution,
    /// Corpus size.
    pub total_luts_analyzed: usize,
}

/// Folds per-LUT results into corpus statistics.
///
/// The result depends only on the set of inputs, never on their order.
pub fn aggregate(results: &[AnalysisResult]) -> AnalyzeResult<AggregateCharacteristics> {
    let field = |f: fn(&AnalysisResult) -> f64| -> AnalyzeResult<Summary> {
        let values: Vec<f64> = results.iter().map(f).collect();
        Summary::of(&values).ok_or(AnalyzeError::EmptyCorpus)
    };

    let mut color_temp_distribution = TemperatureDistribution::default();
    for result in results {
        color_temp_distribution.record(result.color_temperature);
    }

    Ok(AggregateCharacteristics {
        r_shift: field(|r| r.r.mean_shift)?,
        g_shift: field(|r| r.g.mean_shift)?,
        b_shift: field(|r| r.b.mean_shift)?,
        contrast: field(|r| r.contrast)?,
        saturation: field(|r| r.saturation_boost)?,
        shadow_lift: field(|r| r.shadow_lift)?,
        highlight_roll: field(|r| r.highlight_roll)?,
        color_temp_distribution,
        total_luts_analyzed: results.len(),
    })
}

impl AggregateCharacteristics {
    /// Pretty-printed JSON report.
    pub fn to_json(&self) -> AnalyzeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the JSON report to `path`.
    pub fn write_json(&self, path: impl AsRef<Path>) -> AnalyzeResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|source| AnalyzeError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
