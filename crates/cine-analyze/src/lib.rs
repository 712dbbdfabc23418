//! # cine-analyze
//!
//! Statistical characterization of a corpus of 3D LUTs.
//!
//! Given a folder of LUT collections, the analyzer picks the collections
//! whose names match a keyword list, loads a capped number of LUTs from
//! each, measures how every LUT departs from identity and summarizes the
//! corpus.
//!
//! # Pipeline
//!
//! 1. [`discover`] - keyword-matched subdirectories
//! 2. [`load_corpus`] - recursive, path-sorted, capped loading
//! 3. [`analyze`] - per-LUT [`AnalysisResult`]
//! 4. [`aggregate`] - corpus-wide [`AggregateCharacteristics`]
//!
//! [`CorpusAnalyzer`] runs all four from an [`AnalyzerConfig`].
//!
//! # Example
//!
//! ```rust,ignore
//! use cine_analyze::{AnalyzerConfig, CorpusAnalyzer};
//!
//! let analyzer = CorpusAnalyzer::new("/luts", AnalyzerConfig::default());
//! let report = analyzer.run()?;
//! report.aggregate.write_json("cinematic_analysis.json")?;
//! ```
//!
//! # Parallelism
//!
//! With the default `parallel` feature, LUTs are analyzed concurrently on
//! the rayon pool. Aggregation is order-independent, so the report does
//! not depend on scheduling.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod aggregate;
mod analysis;
pub mod config;
pub mod corpus;
pub mod stats;

pub use error::{AnalyzeError, AnalyzeResult};
pub use aggregate::{aggregate, AggregateCharacteristics, TemperatureDistribution};
pub use analysis::{analyze, highlight_roll, saturation_boost, shadow_lift, AnalysisResult, ChannelStats, ColorTemperature};
pub use config::{AnalyzerConfig, SaturationSampling, TemperatureThresholds};
pub use corpus::{discover, load_corpus, LoadedLut};
pub use stats::Summary;

use std::path::PathBuf;
use tracing::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Analyzes every loaded LUT. Output order matches input order.
pub fn analyze_all(luts: &[LoadedLut], config: &AnalyzerConfig) -> Vec<AnalysisResult> {
    #[cfg(feature = "parallel")]
    let results = luts
        .par_iter()
        .map(|l| analyze(&l.lut, &l.filename(), config))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results = luts
        .iter()
        .map(|l| analyze(&l.lut, &l.filename(), config))
        .collect();

    results
}

/// Per-LUT results and their summary.
#[derive(Debug, Clone)]
pub struct CorpusReport {
    /// Folders that matched the keywords.
    pub folders: Vec<String>,
    /// One result per successfully loaded LUT.
    pub results: Vec<AnalysisResult>,
    /// Corpus summary.
    pub aggregate: AggregateCharacteristics,
}

/// Discovery, loading, analysis and aggregation in one place.
#[derive(Debug, Clone)]
pub struct CorpusAnalyzer {
    root: PathBuf,
    config: AnalyzerConfig,
}

impl CorpusAnalyzer {
    /// Creates an analyzer over the collections below `root`.
    pub fn new(root: impl Into<PathBuf>, config: AnalyzerConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Keyword-matched folders below the root.
    pub fn discover(&self) -> AnalyzeResult<Vec<String>> {
        discover(&self.root, &self.config.keywords)
    }

    /// Loads LUTs from the given folders using the configured cap and extension.
    pub fn load(&self, folders: &[String]) -> Vec<LoadedLut> {
        load_corpus(&self.root, folders, self.config.max_per_dir, &self.config.extension)
    }

    /// Runs the whole pipeline.
    ///
    /// Fails if the root cannot be listed or nothing could be loaded.
    pub fn run(&self) -> AnalyzeResult<CorpusReport> {
        self.config.validate()?;

        let folders = self.discover()?;
        info!(root = %self.root.display(), folders = folders.len(), "searching cinematic LUT folders");

        let luts = self.load(&folders);
        info!(loaded = luts.len(), "LUTs loaded");

        let results = analyze_all(&luts, &self.config);
        let aggregate = aggregate(&results)?;
        info!(
            total = aggregate.total_luts_analyzed,
            warm = aggregate.color_temp_distribution.warm,
            cool = aggregate.color_temp_distribution.cool,
            neutral = aggregate.color_temp_distribution.neutral,
            "corpus analyzed"
        );

        Ok(CorpusReport {
            folders,
            results,
            aggregate,
        })
    }
}
