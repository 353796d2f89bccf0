//! Descriptive statistics behind the distribution plots.
//!
//! - equal-width histograms (counts or density)
//! - quartiles and boxplot summaries
//! - Gaussian kernel density estimation with Scott's-rule bandwidth

use crate::config::KdeConfig;
use crate::error::{EdaError, Result};
use ndarray::ArrayView1;
use rayon::prelude::*;
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Equal-width histogram over the sample range.
///
/// Only [`histogram`] builds one, so there is always one more edge than
/// there are bins and at least one bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    heights: Vec<f64>,
}

impl Histogram {
    /// Bin edges, `bins + 1` values in increasing order.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Height of each bin: a count, or a density when requested.
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    pub fn n_bins(&self) -> usize {
        self.heights.len()
    }

    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    /// Outermost edges `(left, right)`.
    pub fn range(&self) -> (f64, f64) {
        let lo = self.edges.first().copied().unwrap_or(0.0);
        let hi = self.edges.last().copied().unwrap_or(lo);
        (lo, hi)
    }

    /// Tallest bar, used to size the y-axis.
    pub fn max_height(&self) -> f64 {
        self.heights.iter().cloned().fold(0.0, f64::max)
    }

    /// `(left, right, height)` for every bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.edges
            .windows(2)
            .zip(self.heights.iter())
            .map(|(edge, &h)| (edge[0], edge[1], h))
    }
}

fn check_sample(values: &ArrayView1<f64>) -> Result<()> {
    if values.is_empty() {
        return Err(EdaError::InvalidInput("sample is empty".to_string()));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(EdaError::InvalidInput(
            "sample contains NaN or infinite values".to_string(),
        ));
    }
    Ok(())
}

fn min_max(values: &ArrayView1<f64>) -> (f64, f64) {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

/// Bin `values` into `n_bins` equal-width bins spanning `[min, max]`.
///
/// Every bin is half-open except the last, which also holds the maximum.
/// A constant sample is binned over `[v - 0.5, v + 0.5]`. With `density`
/// set, heights are scaled so the bar areas sum to one.
pub fn histogram(values: &ArrayView1<f64>, n_bins: usize, density: bool) -> Result<Histogram> {
    check_sample(values)?;
    if n_bins == 0 {
        return Err(EdaError::InvalidParameter(
            "histogram needs at least one bin".to_string(),
        ));
    }

    let (mut lo, mut hi) = min_max(values);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let bin_width = (hi - lo) / n_bins as f64;
    let edges: Vec<f64> = (0..=n_bins).map(|i| lo + i as f64 * bin_width).collect();

    let mut counts = vec![0usize; n_bins];
    for &v in values.iter() {
        let bin = ((v - lo) / bin_width).floor() as usize;
        counts[bin.min(n_bins - 1)] += 1;
    }

    let total = values.len() as f64;
    let heights = counts
        .iter()
        .map(|&c| {
            if density {
                c as f64 / (total * bin_width)
            } else {
                c as f64
            }
        })
        .collect();

    Ok(Histogram { edges, heights })
}

/// Quantile of an ascending-sorted slice by linear interpolation between
/// the two nearest order statistics.
pub fn quantile(sorted: &[f64], q: f64) -> Result<f64> {
    if sorted.is_empty() {
        return Err(EdaError::InvalidInput("sample is empty".to_string()));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(EdaError::InvalidParameter(format!(
            "quantile {} outside [0, 1]",
            q
        )));
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Five-number summary plus outliers, as drawn by a boxplot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxplotSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest sample within `q1 - 1.5 * IQR`.
    pub whisker_low: f64,
    /// Largest sample within `q3 + 1.5 * IQR`.
    pub whisker_high: f64,
    /// Samples beyond the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl BoxplotSummary {
    /// Whisker reach as a multiple of the interquartile range.
    pub const WHISKER_IQR: f64 = 1.5;

    pub fn from_values(values: &ArrayView1<f64>) -> Result<Self> {
        check_sample(values)?;
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = quantile(&sorted, 0.25)?;
        let median = quantile(&sorted, 0.5)?;
        let q3 = quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let low_fence = q1 - Self::WHISKER_IQR * iqr;
        let high_fence = q3 + Self::WHISKER_IQR * iqr;

        // Quartiles are interpolated, so clamp whiskers to the box when no
        // sample falls between fence and box edge.
        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .map_or(q1, |v| v.min(q1));
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .map_or(q3, |v| v.max(q3));
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < whisker_low || v > whisker_high)
            .collect();

        Ok(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Lowest and highest point drawn, outliers included.
    pub fn extent(&self) -> (f64, f64) {
        let lo = self.outliers.first().copied().unwrap_or(self.whisker_low);
        let hi = self.outliers.last().copied().unwrap_or(self.whisker_high);
        (lo.min(self.whisker_low), hi.max(self.whisker_high))
    }
}

/// One-dimensional Gaussian kernel density estimate.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
    kernel: Normal,
}

impl GaussianKde {
    /// Fit to `values` with Scott's rule: `n^(-1/5)` times the sample
    /// standard deviation, scaled by `bw_adjust`.
    pub fn fit(values: &ArrayView1<f64>, bw_adjust: f64) -> Result<Self> {
        check_sample(values)?;
        if !bw_adjust.is_finite() || bw_adjust <= 0.0 {
            return Err(EdaError::InvalidParameter(format!(
                "bandwidth adjustment must be positive and finite, got {}",
                bw_adjust
            )));
        }
        if values.len() < 2 {
            return Err(EdaError::InvalidInput(
                "kernel density needs at least two samples".to_string(),
            ));
        }

        let samples = values.to_vec();
        let std_dev = samples.iter().std_dev();
        if std_dev.is_nan() || std_dev <= 0.0 {
            return Err(EdaError::InvalidInput(
                "sample has zero variance".to_string(),
            ));
        }

        let scott = (samples.len() as f64).powf(-0.2);
        let bandwidth = scott * std_dev * bw_adjust;
        let kernel =
            Normal::new(0.0, 1.0).map_err(|e| EdaError::InvalidParameter(e.to_string()))?;

        Ok(Self {
            samples,
            bandwidth,
            kernel,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Estimated density at `x`.
    pub fn density(&self, x: f64) -> f64 {
        let sum: f64 = self
            .samples
            .iter()
            .map(|&s| self.kernel.pdf((x - s) / self.bandwidth))
            .sum();
        sum / (self.samples.len() as f64 * self.bandwidth)
    }

    /// Evaluate on `config.grid_size` evenly spaced points covering the
    /// sample range extended by `config.cut` bandwidths on each side.
    pub fn evaluate_grid(&self, config: &KdeConfig) -> Result<Vec<(f64, f64)>> {
        if config.grid_size < 2 {
            return Err(EdaError::InvalidParameter(
                "KDE grid needs at least two points".to_string(),
            ));
        }
        if !config.cut.is_finite() || config.cut < 0.0 {
            return Err(EdaError::InvalidParameter(format!(
                "KDE cut must be non-negative and finite, got {}",
                config.cut
            )));
        }
        let min = self.samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self
            .samples
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        let lo = min - config.cut * self.bandwidth;
        let hi = max + config.cut * self.bandwidth;
        let step = (hi - lo) / (config.grid_size - 1) as f64;

        Ok((0..config.grid_size)
            .into_par_iter()
            .map(|i| {
                let x = lo + i as f64 * step;
                (x, self.density(x))
            })
            .collect())
    }
}
