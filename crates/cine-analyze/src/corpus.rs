//! LUT corpus discovery and loading.
//!
//! Discovery looks one level below a root directory for folders whose
//! names match a keyword. Loading then walks each folder recursively,
//! sorts candidate files by path and loads the first `max_per_dir` of
//! them. Broken files are reported and skipped.

use crate::{AnalyzeError, AnalyzeResult};
use cine_lut::Lut3D;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A LUT together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedLut {
    /// Source file.
    pub path: PathBuf,
    /// Parsed table.
    pub lut: Lut3D,
}

impl LoadedLut {
    /// File name component of the source path.
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Lists immediate subdirectories of `root` whose name contains any keyword.
///
/// Matching is case-insensitive. Symlinked directories count. Names are
/// returned sorted.
pub fn discover<S: AsRef<str>>(root: impl AsRef<Path>, keywords: &[S]) -> AnalyzeResult<Vec<String>> {
    let root = root.as_ref();
    let io_err = |source: std::io::Error| AnalyzeError::Io {
        path: root.to_path_buf(),
        source,
    };

    let keywords: Vec<String> = keywords.iter().map(|k| k.as_ref().to_lowercase()).collect();
    let mut found = Vec::new();

    for entry in std::fs::read_dir(root).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        // follows symlinks
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if matches_keyword(&name, &keywords) {
            found.push(name);
        }
    }

    found.sort();
    debug!(root = %root.display(), count = found.len(), "discovered LUT folders");
    Ok(found)
}

/// Returns true if `name` contains any of the lowercase `keywords`.
pub fn matches_keyword(name: &str, keywords: &[String]) -> bool {
    let lower = name.to_lowercase();
    keywords.iter().any(|kw| lower.contains(kw.as_str()))
}

/// Recursively lists LUT files under `dir`, sorted by path.
///
/// Paths compare component by component (`Path` ordering), not as raw
/// strings: `a/x.cube` sorts before `a.cube`. Symlinks are followed.
/// The extension comparison ignores case. Unreadable entries are skipped.
pub fn collect_lut_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(extension))
        })
        .collect();
    files.sort();
    files
}

/// Loads up to `max_per_dir` LUTs from each of `dirs` (relative to `root`).
///
/// A file that fails to parse is logged and skipped; so is a directory
/// that does not exist. The batch itself never fails.
pub fn load_corpus<S: AsRef<str>>(
    root: impl AsRef<Path>,
    dirs: &[S],
    max_per_dir: usize,
    extension: &str,
) -> Vec<LoadedLut> {
    let root = root.as_ref();
    let mut loaded = Vec::new();

    for dir in dirs {
        let dir_path = root.join(dir.as_ref());
        if !dir_path.is_dir() {
            warn!(dir = %dir_path.display(), "LUT folder missing, skipping");
            continue;
        }

        for path in collect_lut_files(&dir_path, extension).into_iter().take(max_per_dir) {
            match cine_lut::read_3d(&path) {
                Ok(lut) => {
                    debug!(file = %path.display(), size = lut.size(), "loaded LUT");
                    loaded.push(LoadedLut { path, lut });
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "failed to load LUT, skipping");
                }
            }
        }
    }

    loaded
}
