//! Order-independent summary statistics.
//!
//! Floating-point addition is not associative, so a plain running sum
//! depends on the order values arrive in. Values are sorted before they
//! are summed, which makes every statistic here a function of the
//! multiset of inputs alone.

use serde::{Deserialize, Serialize};

/// Mean, population standard deviation and range of a set of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl Summary {
    /// Summarizes `values`, or returns `None` when empty.
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;

        let mut sq: Vec<f64> = sorted.iter().map(|v| (v - mean) * (v - mean)).collect();
        sq.sort_by(f64::total_cmp);
        let std = (sq.iter().sum::<f64>() / n).sqrt();

        Some(Self {
            mean,
            std,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Mean of `values`, `None` when empty. Order independent.
pub fn mean(values: &[f64]) -> Option<f64> {
    Summary::of(values).map(|s| s.mean)
}
