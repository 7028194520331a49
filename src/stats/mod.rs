//! Latency statistics: mean, interpolated percentiles and the run summary
//!
//! Percentiles use linear interpolation between the two order statistics
//! bounding the zero-based rank `k = (n - 1) * p / 100`. Other percentile
//! conventions give different values on small sample sets, so this exact
//! formula is what reported TP90/TP99 figures are compared against.

use crate::{
    defaults::{TP90, TP99},
    models::SampleSet,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Interpolated `percent`-th percentile of `data`.
///
/// Returns `None` for empty input or a percentile outside `[0, 100]`.
pub fn percentile(data: &[f64], percent: f64) -> Option<f64> {
    if data.is_empty() {
        return None;
    }

    let mut sorted = data.to_vec();
    sort_ascending(&mut sorted);
    percentile_of_sorted(&sorted, percent)
}

/// Same as [`percentile`] for data already sorted ascending
pub fn percentile_of_sorted(sorted: &[f64], percent: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&percent) {
        return None;
    }

    let last = sorted.len() - 1;
    let k = last as f64 * (percent / 100.0);
    let f = k.floor() as usize;
    let c = (f + 1).min(last);

    if f == c {
        return Some(sorted[f]);
    }

    let d0 = sorted[f] * (c as f64 - k);
    let d1 = sorted[c] * (k - f as f64);
    Some(d0 + d1)
}

/// Arithmetic mean, `None` for empty input
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation, `None` for empty input
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let avg = mean(data)?;
    let variance = data.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / data.len() as f64;
    Some(variance.sqrt())
}

fn sort_ascending(values: &mut [f64]) {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
}

/// Summary of one probe session. Durations are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Successful samples
    pub count: usize,
    /// Runs attempted
    pub attempted: u32,
    /// Runs that produced no sample
    pub failed: u32,
    pub mean: f64,
    pub tp90: f64,
    pub tp99: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl Summary {
    /// Summarize a sample set; `None` when it holds no samples
    pub fn from_samples(samples: &SampleSet) -> Option<Self> {
        let values = samples.samples();
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sort_ascending(&mut sorted);

        Some(Self {
            count: sorted.len(),
            attempted: samples.attempted(),
            failed: samples.failed(),
            mean: mean(values)?,
            tp90: percentile_of_sorted(&sorted, TP90)?,
            tp99: percentile_of_sorted(&sorted, TP99)?,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            median: percentile_of_sorted(&sorted, 50.0)?,
            std_dev: std_dev(values)?,
        })
    }

    /// Share of attempted runs that produced a sample, in percent
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.count as f64 / self.attempted as f64 * 100.0
        }
    }
}
