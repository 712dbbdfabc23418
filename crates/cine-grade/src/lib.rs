//! # cine-grade
//!
//! Synthesis of cinematic-look 3D LUTs.
//!
//! A LUT is produced by running every grid node through a fixed-order
//! color pipeline ([`pipeline`]) driven by [`GenerationParameters`].
//! Nodes are independent, so the cube is filled with a data-parallel map.
//!
//! # Example
//!
//! ```rust
//! use cine_grade::{generate, GenerationParameters};
//!
//! let lut = generate(&GenerationParameters::default().with_size(17)).unwrap();
//! assert_eq!(lut.size(), 17);
//! ```
//!
//! # Presets
//!
//! [`Preset`] names four ready-made looks; [`generate_presets`] writes all
//! of them as `.cube` files.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod params;
pub mod pipeline;

pub use error::{GradeError, GradeResult};
pub use params::{GenerationParameters, Preset};

use cine_lut::{grid_coord, Lut3D};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Builds a LUT by grading every node of a `params.size` cube.
///
/// Output is deterministic: identical parameters give identical grids
/// regardless of thread count.
pub fn generate(params: &GenerationParameters) -> GradeResult<Lut3D> {
    params.validate()?;

    let size = params.size;
    let total = size
        .checked_mul(size)
        .and_then(|v| v.checked_mul(size))
        .ok_or_else(|| GradeError::Validation(format!("size {} overflows", size)))?;

    let voxel = |k: usize| {
        let (r, g, b) = (k % size, (k / size) % size, k / (size * size));
        let input = [grid_coord(r, size), grid_coord(g, size), grid_coord(b, size)];
        pipeline::grade_voxel(input, params)
    };

    #[cfg(feature = "parallel")]
    let data: Vec<[f64; 3]> = (0..total).into_par_iter().map(voxel).collect();

    #[cfg(not(feature = "parallel"))]
    let data: Vec<[f64; 3]> = (0..total).map(voxel).collect();

    debug!(size, contrast = params.contrast, saturation = params.saturation, "generated LUT");
    Ok(Lut3D::from_data(data, size)?)
}

/// Generates a preset at its own parameters.
pub fn generate_preset(preset: Preset) -> GradeResult<Lut3D> {
    Ok(generate(&preset.params())?.with_title(preset.title()))
}

/// Writes every [`Preset`] into `dir` as `<stem>.cube`.
///
/// Creates `dir` if needed. Returns the written paths in [`Preset::ALL`] order.
pub fn generate_presets(dir: impl AsRef<Path>) -> GradeResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(Preset::ALL.len());
    for preset in Preset::ALL {
        let lut = generate_preset(preset)?;
        let path = dir.join(format!("{}.cube", preset.file_stem()));
        cine_lut::write_3d(&path, &lut, preset.title())?;
        info!(path = %path.display(), "generated preset");
        written.push(path);
    }
    Ok(written)
}
