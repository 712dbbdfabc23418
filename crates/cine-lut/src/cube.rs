//! Adobe/Resolve .cube LUT format support.
//!
//! The .cube format is a simple text-based LUT format widely supported
//! by DaVinci Resolve, Adobe applications, and many other tools.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "LUT Name"
//! LUT_3D_SIZE 33
//! DOMAIN_MIN 0.0 0.0 0.0
//! DOMAIN_MAX 1.0 1.0 1.0
//! 0.0 0.0 0.0
//! ...
//! 1.0 1.0 1.0
//! ```
//!
//! Rows run R fastest, then G, then B. When `LUT_3D_SIZE` is missing the
//! size is the exact cube root of the row count.
//!
//! # Example
//!
//! ```rust,ignore
//! use cine_lut::cube;
//!
//! let lut = cube::read_3d("grade.cube")?;
//! cube::write_3d("copy.cube", &lut, "Copy")?;
//! ```

use crate::{Lut3D, LutError, LutResult};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Reads a 3D LUT from a .cube file.
///
/// A file that cannot be opened or read yields [`LutError::Read`];
/// malformed content yields [`LutError::ParseError`].
pub fn read_3d<P: AsRef<Path>>(path: P) -> LutResult<Lut3D> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LutError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_3d(BufReader::new(file)).map_err(|e| match e {
        LutError::Io(source) => LutError::Read {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parses a 3D LUT from a reader.
pub fn parse_3d<R: BufRead>(reader: R) -> LutResult<Lut3D> {
    let mut title = String::new();
    let mut size: Option<usize> = None;
    let mut domain_min = crate::lut3d::DEFAULT_DOMAIN_MIN;
    let mut domain_max = crate::lut3d::DEFAULT_DOMAIN_MAX;
    let mut data: Vec<[f64; 3]> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => {
                LutError::ParseError(format!("line {}: not valid UTF-8", line_no))
            }
            _ => LutError::Io(e),
        })?;
        let mut line = line.trim();
        if line_no == 1 {
            line = line.trim_start_matches('\u{feff}').trim_start();
        }

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let keyword = line.split_whitespace().next().unwrap_or_default();
        match keyword {
            "TITLE" => title = parse_title(line),
            "LUT_3D_SIZE" => size = Some(parse_size(line, line_no)?),
            "LUT_1D_SIZE" => {
                return Err(LutError::ParseError(format!(
                    "line {}: expected 3D LUT, found 1D",
                    line_no
                )));
            }
            "DOMAIN_MIN" => domain_min = parse_triple(rest(line), line_no, "DOMAIN_MIN")?,
            "DOMAIN_MAX" => domain_max = parse_triple(rest(line), line_no, "DOMAIN_MAX")?,
            "LUT_3D_INPUT_RANGE" => {
                let (lo, hi) = parse_range(line, line_no)?;
                domain_min = [lo; 3];
                domain_max = [hi; 3];
            }
            _ => data.push(parse_triple(line, line_no, "data row")?),
        }
    }

    if data.is_empty() {
        return Err(LutError::ParseError("no data rows".into()));
    }

    let size = match size {
        Some(size) => {
            let expected = size.checked_pow(3).ok_or_else(|| {
                LutError::ParseError(format!("LUT_3D_SIZE {} is too large", size))
            })?;
            if size == 0 || data.len() != expected {
                return Err(LutError::ParseError(format!(
                    "LUT_3D_SIZE {} expects {} rows, found {}",
                    size,
                    expected,
                    data.len()
                )));
            }
            size
        }
        None => exact_cube_root(data.len()).ok_or_else(|| {
            LutError::ParseError(format!(
                "no LUT_3D_SIZE and {} rows is not a perfect cube",
                data.len()
            ))
        })?,
    };

    // File order and memory order are both R-fastest
    let lut = Lut3D::from_data(data, size)?
        .with_domain(domain_min, domain_max)?
        .with_title(title);

    Ok(lut)
}

/// Writes a 3D LUT to a .cube file under the given title.
///
/// The file is written next to `path` under a temporary name and renamed
/// into place once complete, so readers never observe a partial file.
///
/// The `TITLE` header is quoted, so double quotes inside `title` are
/// written as single quotes and do not round-trip.
///
/// # Example
///
/// ```rust,ignore
/// let lut = Lut3D::identity(33);
/// cube::write_3d("identity.cube", &lut, "Identity")?;
/// ```
pub fn write_3d<P: AsRef<Path>>(path: P, lut: &Lut3D, title: &str) -> LutResult<()> {
    let path = path.as_ref();
    let tmp = temp_path(path);

    let written = File::create(&tmp).map_err(LutError::from).and_then(|file| {
        let mut writer = BufWriter::new(file);
        write_to(&mut writer, lut, title)?;
        writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        Ok(())
    });

    match written {
        Ok(()) => {
            fs::rename(&tmp, path)?;
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

/// Serializes a 3D LUT in .cube syntax to any writer.
pub fn write_to<W: Write>(writer: &mut W, lut: &Lut3D, title: &str) -> LutResult<()> {
    let min = lut.domain_min();
    let max = lut.domain_max();

    // Header
    writeln!(writer, "TITLE \"{}\"", title.replace('"', "'"))?;
    writeln!(writer, "LUT_3D_SIZE {}", lut.size())?;
    writeln!(writer, "DOMAIN_MIN {:.6} {:.6} {:.6}", min[0], min[1], min[2])?;
    writeln!(writer, "DOMAIN_MAX {:.6} {:.6} {:.6}", max[0], max[1], max[2])?;
    writeln!(writer)?;

    // Data - R fastest, then G, then B, which is also memory order
    for rgb in lut.data() {
        writeln!(writer, "{:.6} {:.6} {:.6}", rgb[0], rgb[1], rgb[2])?;
    }
    writer.flush()?;

    Ok(())
}

/// Loads a LUT. Same as [`read_3d`].
#[inline]
pub fn load<P: AsRef<Path>>(path: P) -> LutResult<Lut3D> {
    read_3d(path)
}

/// Saves a LUT under a title. Same as [`write_3d`].
#[inline]
pub fn save<P: AsRef<Path>>(lut: &Lut3D, path: P, title: &str) -> LutResult<()> {
    write_3d(path, lut, title)
}

// Helper functions

fn rest(line: &str) -> &str {
    line.split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim())
        .unwrap_or("")
}

fn parse_title(line: &str) -> String {
    let text = rest(line);
    match (text.find('"'), text.rfind('"')) {
        (Some(start), Some(end)) if end > start => text[start + 1..end].to_string(),
        _ => text.trim_matches('"').to_string(),
    }
}

fn parse_size(line: &str, line_no: usize) -> LutResult<usize> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(LutError::ParseError(format!("line {}: invalid size line", line_no)));
    }
    parts[1]
        .parse()
        .map_err(|_| LutError::ParseError(format!("line {}: invalid size value '{}'", line_no, parts[1])))
}

fn parse_range(line: &str, line_no: usize) -> LutResult<(f64, f64)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(LutError::ParseError(format!("line {}: invalid input range", line_no)));
    }
    let lo = parse_float(parts[1], line_no)?;
    let hi = parse_float(parts[2], line_no)?;
    Ok((lo, hi))
}

fn parse_triple(text: &str, line_no: usize, what: &str) -> LutResult<[f64; 3]> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(LutError::ParseError(format!(
            "line {}: {} needs exactly 3 values, found {}",
            line_no,
            what,
            parts.len()
        )));
    }
    Ok([
        parse_float(parts[0], line_no)?,
        parse_float(parts[1], line_no)?,
        parse_float(parts[2], line_no)?,
    ])
}

fn parse_float(token: &str, line_no: usize) -> LutResult<f64> {
    let value: f64 = token
        .parse()
        .map_err(|_| LutError::ParseError(format!("line {}: invalid number '{}'", line_no, token)))?;
    if !value.is_finite() {
        return Err(LutError::NonFinite(format!("line {}: '{}'", line_no, token)));
    }
    Ok(value)
}

fn exact_cube_root(n: usize) -> Option<usize> {
    let guess = (n as f64).cbrt().round() as usize;
    (guess.saturating_sub(1)..=guess + 1).find(|&s| s.checked_pow(3) == Some(n))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
