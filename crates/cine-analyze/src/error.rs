//! Error types for corpus analysis.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for analysis operations.
pub type AnalyzeResult<T> = Result<T, AnalyzeError>;

/// Errors that can occur while discovering, loading or summarizing LUTs.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// A directory or file could not be accessed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Aggregation was asked to summarize zero results.
    #[error("no LUTs to aggregate")]
    EmptyCorpus,

    /// LUT loading error.
    #[error("LUT error: {0}")]
    Lut(#[from] cine_lut::LutError),

    /// YAML configuration error.
    #[error("config parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// JSON report serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration values that cannot be used.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
