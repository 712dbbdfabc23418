//! Error types for LUT generation.

use thiserror::Error;

/// Error type for LUT generation.
#[derive(Error, Debug)]
pub enum GradeError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    Validation(String),

    /// Building or writing the LUT failed.
    #[error("LUT error: {0}")]
    Lut(#[from] cine_lut::LutError),

    /// YAML parameter file could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for LUT generation.
pub type GradeResult<T> = Result<T, GradeError>;
