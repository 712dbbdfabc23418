//! LUT error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur during LUT operations.
#[derive(Debug, Error)]
pub enum LutError {
    /// Grid size does not match the data it was given.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// Domain bounds are empty or inverted on some channel.
    #[error("invalid domain on channel {channel}: [{min}, {max}]")]
    InvalidDomain {
        /// Channel index (0 = R, 1 = G, 2 = B)
        channel: usize,
        /// Minimum value
        min: f64,
        /// Maximum value
        max: f64,
    },

    /// A stored or parsed value is NaN or infinite.
    #[error("non-finite value: {0}")]
    NonFinite(String),

    /// Parse error when loading LUT files.
    #[error("parse error: {0}")]
    ParseError(String),

    /// The LUT file could not be opened or read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LutError {
    /// Returns true for failures that mean "this file is not a usable LUT":
    /// malformed content or an unreadable file.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::ParseError(_)
                | Self::Read { .. }
                | Self::InvalidSize(_)
                | Self::InvalidDomain { .. }
                | Self::NonFinite(_)
        )
    }
}
