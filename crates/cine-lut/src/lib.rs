//! # cine-lut
//!
//! 3D Look-Up Table (LUT) types for cinematic color grading.
//!
//! This crate is the document model shared by the analyzer and the
//! generator: an in-memory 3D LUT, `.cube` parsing and writing, and
//! trilinear sampling of arbitrary colors.
//!
//! # Usage
//!
//! ```rust
//! use cine_lut::Lut3D;
//!
//! let lut = Lut3D::identity(33);
//! let rgb = lut.sample([0.5, 0.3, 0.2]);
//! assert!((rgb[1] - 0.3).abs() < 1e-12);
//! ```
//!
//! Consumers that only reference LUTs by path need three calls:
//! [`load`], [`save`] and [`sample`].
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling
//!
//! # Used By
//!
//! - `cine-analyze` - Corpus statistics
//! - `cine-grade` - LUT synthesis

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod lut3d;
mod sample;
pub mod cube;

pub use error::{LutError, LutResult};
pub use lut3d::{grid_coord, Lut3D, DEFAULT_DOMAIN_MAX, DEFAULT_DOMAIN_MIN};
pub use sample::sample;
pub use cube::{load, parse_3d, read_3d, save, write_3d, write_to};
