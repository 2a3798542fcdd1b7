//! Returns Distribution implementation.
//!
//! Summarizes the distribution of bar-to-bar percent returns and places the
//! most recent return within it.

use indicator_api::ReturnsDistributionConfig;
use indicator_spi::{IndicatorError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::series::absent;

/// Narrowest span the histogram will cover, in percent.
pub const MIN_SPAN: f64 = 0.01;

/// One histogram bucket over `[start, end)`. The last bucket is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    pub label: String,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Distribution statistics for the historical returns sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnsSummary {
    /// Size of the historical sample.
    pub sample_size: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std_dev: f64,
    pub min_historical: f64,
    pub max_historical: f64,
    /// Minimum over history and the current return.
    pub min: f64,
    /// Maximum over history and the current return.
    pub max: f64,
    pub current: f64,
    pub is_new_high: bool,
    pub is_new_low: bool,
    pub bin_size: f64,
    pub bins: Vec<HistogramBin>,
    /// Bucket holding the current return, clamped into range.
    pub current_bin: usize,
}

impl ReturnsSummary {
    pub fn is_new_extreme(&self) -> bool {
        self.is_new_high || self.is_new_low
    }
}

/// Percent-returns distribution.
#[derive(Debug, Clone)]
pub struct ReturnsDistribution {
    /// Historical returns to keep; 0 keeps everything before the current one.
    lookback: usize,
    /// Histogram buckets; 0 picks `max(10, ceil(sqrt(n)))`.
    bins: usize,
}

impl ReturnsDistribution {
    pub fn new(lookback: usize, bins: usize) -> Self {
        Self { lookback, bins }
    }

    pub fn from_config(config: ReturnsDistributionConfig) -> Self {
        Self::new(config.lookback, config.bins)
    }

    /// Percent returns aligned with `close`; index 0 is absent.
    pub fn percent_returns(close: &[f64]) -> Vec<f64> {
        let mut result = absent(close.len());
        for i in 1..close.len() {
            result[i] = (close[i] / close[i - 1] - 1.0) * 100.0;
        }
        result
    }

    /// Bucket count for a sample of size `n`.
    pub fn bucket_count(&self, n: usize) -> usize {
        if self.bins > 0 {
            self.bins
        } else {
            ((n as f64).sqrt().ceil() as usize).max(10)
        }
    }

    /// Summarize the distribution of `close` returns.
    ///
    /// Absent returns are dropped. Fails with `InsufficientData` when fewer
    /// than two historical returns remain.
    pub fn calculate(&self, close: &[f64]) -> Result<ReturnsSummary> {
        let returns: Vec<f64> = Self::percent_returns(close)
            .into_iter()
            .filter(|r| r.is_finite())
            .collect();

        let Some((&current, before)) = returns.split_last() else {
            return Err(IndicatorError::InsufficientData { required: 2, got: 0 });
        };
        let start = if self.lookback > 0 {
            before.len().saturating_sub(self.lookback)
        } else {
            0
        };
        let history = &before[start..];

        if history.len() <= 1 {
            return Err(IndicatorError::InsufficientData {
                required: 2,
                got: history.len(),
            });
        }

        let n = history.len();
        let mean = history.iter().sum::<f64>() / n as f64;
        let variance = history.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
            / (n - 1).max(1) as f64;
        let std_dev = variance.max(0.0).sqrt();

        let min_historical = history.iter().copied().fold(f64::INFINITY, f64::min);
        let max_historical = history.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = min_historical.min(current);
        let max = max_historical.max(current);

        let num_bins = self.bucket_count(n);
        let span = (max - min).max(MIN_SPAN);
        let bin_size = span / num_bins as f64;

        let bins: Vec<HistogramBin> = (0..num_bins)
            .map(|b| {
                let bin_start = min + b as f64 * bin_size;
                let bin_end = min + (b + 1) as f64 * bin_size;
                // Every sample is <= max, so the last bucket takes the rest.
                let last = b == num_bins - 1;
                let count = history
                    .iter()
                    .filter(|&&r| r >= bin_start && (last || r < bin_end))
                    .count();
                HistogramBin {
                    start: bin_start,
                    end: bin_end,
                    count,
                    label: format!("{:.2}%", bin_start),
                }
            })
            .collect();

        let raw_bin = ((current - min) / bin_size).floor();
        let current_bin = if raw_bin <= 0.0 {
            0
        } else {
            (raw_bin as usize).min(num_bins - 1)
        };

        debug!(n, num_bins, current, "returns distribution");

        Ok(ReturnsSummary {
            sample_size: n,
            mean,
            std_dev,
            min_historical,
            max_historical,
            min,
            max,
            current,
            is_new_high: current > max_historical,
            is_new_low: current < min_historical,
            bin_size,
            bins,
            current_bin,
        })
    }
}

impl Default for ReturnsDistribution {
    fn default() -> Self {
        Self::from_config(ReturnsDistributionConfig::default())
    }
}
