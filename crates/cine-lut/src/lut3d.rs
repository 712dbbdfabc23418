//! 3-dimensional lookup table.
//!
//! A 3D LUT maps RGB input to RGB output through a cube of color values.
//! Here it is the in-memory form of a `.cube` file: a title, a domain and
//! `size^3` output triples.

use crate::{LutError, LutResult};

/// Default input domain minimum.
pub const DEFAULT_DOMAIN_MIN: [f64; 3] = [0.0, 0.0, 0.0];

/// Default input domain maximum.
pub const DEFAULT_DOMAIN_MAX: [f64; 3] = [1.0, 1.0, 1.0];

/// A 3-dimensional lookup table.
///
/// Stores a cube of RGB values indexed by input RGB. Standard sizes are
/// 17x17x17, 33x33x33, or 65x65x65.
///
/// # Structure
///
/// - `size^3` entries in one flat buffer
/// - R varies fastest, then G, then B: `index = (b * size + g) * size + r`
/// - This is the same order rows appear in a `.cube` file
///
/// Constructors check that the buffer length matches `size`, that the
/// domain is non-empty on every channel and that every value is finite,
/// so a `Lut3D` in hand always satisfies those three properties.
///
/// # Example
///
/// ```rust
/// use cine_lut::Lut3D;
///
/// let lut = Lut3D::identity(33);
/// let output = lut.sample([0.5, 0.3, 0.2]);
/// assert!((output[0] - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3D {
    /// Display title (free text, may be empty).
    pub title: String,
    data: Vec<[f64; 3]>,
    size: usize,
    domain_min: [f64; 3],
    domain_max: [f64; 3],
}

impl Lut3D {
    /// Creates an identity (pass-through) 3D LUT.
    ///
    /// Node `(r, g, b)` holds `(r/(size-1), g/(size-1), b/(size-1))`.
    /// A single-node LUT holds black.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn identity(size: usize) -> Self {
        assert!(size > 0, "LUT size must be at least 1");
        Self::build(size, |r, g, b| {
            [grid_coord(r, size), grid_coord(g, size), grid_coord(b, size)]
        })
    }

    /// Creates a 3D LUT from raw data.
    ///
    /// Data must be in R-fastest order with exactly `size^3` entries.
    pub fn from_data(data: Vec<[f64; 3]>, size: usize) -> LutResult<Self> {
        if size == 0 {
            return Err(LutError::InvalidSize("size must be at least 1".into()));
        }
        let expected = cube_len(size)?;
        if data.len() != expected {
            return Err(LutError::InvalidSize(format!(
                "expected {} entries for size {}, got {}",
                expected,
                size,
                data.len()
            )));
        }
        if let Some(k) = data.iter().position(|v| v.iter().any(|c| !c.is_finite())) {
            return Err(LutError::NonFinite(format!("entry {} is {:?}", k, data[k])));
        }
        Ok(Self {
            title: String::new(),
            data,
            size,
            domain_min: DEFAULT_DOMAIN_MIN,
            domain_max: DEFAULT_DOMAIN_MAX,
        })
    }

    /// Creates a 3D LUT by evaluating `f(r, g, b)` at every grid node.
    ///
    /// Fails if `f` produces a non-finite value.
    pub fn from_fn<F>(size: usize, f: F) -> LutResult<Self>
    where
        F: FnMut(usize, usize, usize) -> [f64; 3],
    {
        if size == 0 {
            return Err(LutError::InvalidSize("size must be at least 1".into()));
        }
        cube_len(size)?;
        let lut = Self::build(size, f);
        Self::from_data(lut.data, size)
    }

    fn build<F>(size: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> [f64; 3],
    {
        let mut data = Vec::with_capacity(size * size * size);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push(f(r, g, b));
                }
            }
        }
        Self {
            title: String::new(),
            data,
            size,
            domain_min: DEFAULT_DOMAIN_MIN,
            domain_max: DEFAULT_DOMAIN_MAX,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the input domain.
    ///
    /// Fails unless `min[i] < max[i]` and both are finite on every channel.
    pub fn with_domain(mut self, min: [f64; 3], max: [f64; 3]) -> LutResult<Self> {
        for channel in 0..3 {
            let (lo, hi) = (min[channel], max[channel]);
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(LutError::InvalidDomain { channel, min: lo, max: hi });
            }
        }
        self.domain_min = min;
        self.domain_max = max;
        Ok(self)
    }

    /// Cube size (nodes per axis).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Input domain minimum.
    #[inline]
    pub fn domain_min(&self) -> [f64; 3] {
        self.domain_min
    }

    /// Input domain maximum.
    #[inline]
    pub fn domain_max(&self) -> [f64; 3] {
        self.domain_max
    }

    /// The flat grid, R fastest.
    #[inline]
    pub fn data(&self) -> &[[f64; 3]] {
        &self.data
    }

    /// Returns the total number of entries in the LUT.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.data.len()
    }

    /// Returns the flat index for a given (r, g, b) grid position.
    #[inline]
    pub fn index(&self, r: usize, g: usize, b: usize) -> usize {
        (b * self.size + g) * self.size + r
    }

    /// Gets the value at grid position (r, g, b).
    #[inline]
    pub fn get(&self, r: usize, g: usize, b: usize) -> [f64; 3] {
        self.data[self.index(r, g, b)]
    }

    /// Grid position of a flat index, the inverse of [`Lut3D::index`].
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize, usize) {
        let n = self.size;
        (index % n, (index / n) % n, index / (n * n))
    }

    /// Largest absolute per-channel difference to another LUT of the same size.
    ///
    /// Returns `None` when sizes differ.
    pub fn max_abs_diff(&self, other: &Lut3D) -> Option<f64> {
        if self.size != other.size {
            return None;
        }
        let diff = self
            .data
            .iter()
            .zip(&other.data)
            .flat_map(|(a, b)| (0..3).map(move |i| (a[i] - b[i]).abs()))
            .fold(0.0f64, f64::max);
        Some(diff)
    }
}

/// Normalized coordinate of node `i` on an axis of `size` nodes.
///
/// `i / (size - 1)`, or 0 for a single-node axis.
#[inline]
pub fn grid_coord(i: usize, size: usize) -> f64 {
    if size < 2 {
        0.0
    } else {
        i as f64 / (size - 1) as f64
    }
}

fn cube_len(size: usize) -> LutResult<usize> {
    size.checked_mul(size)
        .and_then(|v| v.checked_mul(size))
        .ok_or_else(|| LutError::InvalidSize(format!("size {} overflows", size)))
}
