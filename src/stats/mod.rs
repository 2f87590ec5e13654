//! Descriptive statistics over latency samples
//!
//! Percentiles use linear interpolation between closest ranks, the same
//! definition NumPy applies by default, so reports line up with the usual
//! reference tooling.

use serde::{Deserialize, Serialize};

/// Summary of one run's latency samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    /// Number of latency samples
    pub count: usize,
    /// Error count reported alongside the samples
    pub errors: u64,
    /// Arithmetic mean (milliseconds)
    pub mean_ms: f64,
    /// 50th percentile (milliseconds)
    pub median_ms: f64,
    /// 95th percentile (milliseconds)
    pub p95_ms: f64,
    /// 99th percentile (milliseconds)
    pub p99_ms: f64,
    /// Smallest sample (milliseconds)
    pub min_ms: f64,
    /// Largest sample (milliseconds)
    pub max_ms: f64,
    /// Population standard deviation (milliseconds)
    pub std_dev_ms: f64,
}

impl LatencySummary {
    /// Summarise samples; `None` when there is nothing to summarise
    pub fn from_samples(samples: &[f64], errors: u64) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let sorted = sorted_copy(samples);
        let mean_ms = mean(samples);
        let variance = if samples.len() > 1 {
            samples.iter().map(|&x| (x - mean_ms).powi(2)).sum::<f64>() / samples.len() as f64
        } else {
            0.0
        };

        Some(Self {
            count: samples.len(),
            errors,
            mean_ms,
            median_ms: percentile(&sorted, 50.0),
            p95_ms: percentile(&sorted, 95.0),
            p99_ms: percentile(&sorted, 99.0),
            min_ms: sorted[0],
            max_ms: sorted[sorted.len() - 1],
            std_dev_ms: variance.sqrt(),
        })
    }
}

/// Copy and sort samples ascending
pub fn sorted_copy(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Arithmetic mean; 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Linear-interpolation percentile over already sorted values
pub fn percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let percentile = percentile.clamp(0.0, 100.0);
    let index = (percentile / 100.0) * (sorted_values.len() as f64 - 1.0);
    let lower_index = index.floor() as usize;
    let upper_index = index.ceil() as usize;

    if lower_index == upper_index {
        sorted_values[lower_index]
    } else {
        let lower_value = sorted_values[lower_index];
        let upper_value = sorted_values[upper_index];
        let weight = index - lower_index as f64;
        lower_value + weight * (upper_value - lower_value)
    }
}

/// Fixed-width frequency histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Left edge of the first bin
    pub lower: f64,
    /// Width shared by every bin
    pub bin_width: f64,
    /// Sample count per bin
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// The maximum lands in the last bin. When every value is equal the
    /// span is widened to one unit centred on that value.
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let (lower, upper) = if max > min { (min, max) } else { (min - 0.5, min + 0.5) };
        let bin_width = (upper - lower) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &value in values {
            let index = ((value - lower) / bin_width).floor() as usize;
            counts[index.min(bins - 1)] += 1;
        }

        Some(Self { lower, bin_width, counts })
    }

    /// Right edge of the last bin
    pub fn upper(&self) -> f64 {
        self.lower + self.bin_width * self.counts.len() as f64
    }

    /// `(left, right, count)` for every bin
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.counts.iter().enumerate().map(move |(i, &count)| {
            let left = self.lower + self.bin_width * i as f64;
            (left, left + self.bin_width, count)
        })
    }

    /// Tallest bin
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}
