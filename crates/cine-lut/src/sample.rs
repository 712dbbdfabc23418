//! Trilinear sampling of a 3D LUT.
//!
//! Inputs are clamped to the LUT domain (no extrapolation), normalized over
//! it and mapped onto the grid. The eight surrounding nodes are blended
//! along R first, then G, then B.

use crate::Lut3D;

impl Lut3D {
    /// Evaluates the LUT at an arbitrary RGB input.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cine_lut::Lut3D;
    ///
    /// let lut = Lut3D::identity(17);
    /// let out = lut.sample([0.25, 0.5, 0.75]);
    /// assert!((out[2] - 0.75).abs() < 1e-12);
    /// ```
    pub fn sample(&self, rgb: [f64; 3]) -> [f64; 3] {
        let size = self.size();
        if size == 1 {
            return self.data()[0];
        }

        let n = (size - 1) as f64;
        let min = self.domain_min();
        let max = self.domain_max();

        let mut base = [0usize; 3];
        let mut frac = [0.0f64; 3];
        for i in 0..3 {
            let v = rgb[i].clamp(min[i], max[i]);
            let idx = (v - min[i]) / (max[i] - min[i]) * n;
            // floor + 1 must stay on the grid
            let lo = (idx.floor() as usize).min(size - 2);
            base[i] = lo;
            frac[i] = idx - lo as f64;
        }

        let [ri, gi, bi] = base;
        let [rf, gf, bf] = frac;

        let c000 = self.get(ri, gi, bi);
        let c100 = self.get(ri + 1, gi, bi);
        let c010 = self.get(ri, gi + 1, bi);
        let c110 = self.get(ri + 1, gi + 1, bi);
        let c001 = self.get(ri, gi, bi + 1);
        let c101 = self.get(ri + 1, gi, bi + 1);
        let c011 = self.get(ri, gi + 1, bi + 1);
        let c111 = self.get(ri + 1, gi + 1, bi + 1);

        let mut result = [0.0f64; 3];
        for i in 0..3 {
            let c00 = lerp(c000[i], c100[i], rf);
            let c10 = lerp(c010[i], c110[i], rf);
            let c01 = lerp(c001[i], c101[i], rf);
            let c11 = lerp(c011[i], c111[i], rf);

            let c0 = lerp(c00, c10, gf);
            let c1 = lerp(c01, c11, gf);

            result[i] = lerp(c0, c1, bf);
        }
        result
    }
}

/// Samples `lut` at `(r, g, b)`.
///
/// Free-function form of [`Lut3D::sample`] for callers that hold a LUT
/// by reference and a color as three scalars.
#[inline]
pub fn sample(lut: &Lut3D, r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let [r, g, b] = lut.sample([r, g, b]);
    (r, g, b)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}
