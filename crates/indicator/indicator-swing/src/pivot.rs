//! Pivot highs/lows implementation.
//!
//! Identifies confirmed local extrema with independent left/right windows.

use indicator_api::PivotConfig;
use indicator_spi::{IndicatorOutput, OHLCSeries, Result, TechnicalIndicator};
use serde::{Deserialize, Serialize};

/// Pivot point type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotType {
    High,
    Low,
}

/// Whether `series[i]` is a pivot low over `[i - left, i + right]`.
///
/// Every value in the window must be present and no lower than `series[i]`.
/// Ties are allowed, so a plateau counts.
pub fn is_pivot_low(series: &[f64], i: usize, left: usize, right: usize) -> bool {
    is_pivot(series, i, left, right, |vk, v| vk < v)
}

/// Whether `series[i]` is a pivot high over `[i - left, i + right]`.
pub fn is_pivot_high(series: &[f64], i: usize, left: usize, right: usize) -> bool {
    is_pivot(series, i, left, right, |vk, v| vk > v)
}

fn is_pivot<F>(series: &[f64], i: usize, left: usize, right: usize, beats: F) -> bool
where
    F: Fn(f64, f64) -> bool,
{
    if i < left || i + right >= series.len() {
        return false;
    }
    let v = series[i];
    if v.is_nan() {
        return false;
    }
    series[i - left..=i + right]
        .iter()
        .all(|&vk| !vk.is_nan() && !beats(vk, v))
}

/// Pivot Highs/Lows detector.
///
/// A pivot at index `p` is only known once `right` further bars exist, so a
/// pass over `N` bars can confirm pivots up to `N - 1 - right`.
///
/// Output:
/// - Primary: pivot-low value at each confirmed low, NaN elsewhere
/// - Secondary: pivot-high value at each confirmed high, NaN elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PivotDetector {
    left: usize,
    right: usize,
}

impl PivotDetector {
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// Create with symmetric lookback.
    pub fn symmetric(bars: usize) -> Self {
        Self::new(bars, bars)
    }

    pub fn from_config(config: PivotConfig) -> Self {
        Self::new(config.left, config.right)
    }

    pub fn left(&self) -> usize {
        self.left
    }

    pub fn right(&self) -> usize {
        self.right
    }

    pub fn is_low(&self, series: &[f64], i: usize) -> bool {
        is_pivot_low(series, i, self.left, self.right)
    }

    pub fn is_high(&self, series: &[f64], i: usize) -> bool {
        is_pivot_high(series, i, self.left, self.right)
    }

    /// Indices in the order a bar-by-bar pass would confirm them.
    pub fn confirmations(&self, series: &[f64]) -> Vec<(usize, PivotType)> {
        let mut found = Vec::new();
        for i in self.right..series.len() {
            let p = i - self.right;
            if self.is_low(series, p) {
                found.push((p, PivotType::Low));
            }
            if self.is_high(series, p) {
                found.push((p, PivotType::High));
            }
        }
        found
    }

    /// Calculate pivot-low and pivot-high series.
    pub fn calculate(&self, series: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let n = series.len();
        let mut lows = vec![f64::NAN; n];
        let mut highs = vec![f64::NAN; n];

        for (p, kind) in self.confirmations(series) {
            match kind {
                PivotType::Low => lows[p] = series[p],
                PivotType::High => highs[p] = series[p],
            }
        }

        (lows, highs)
    }
}

impl Default for PivotDetector {
    fn default() -> Self {
        Self::from_config(PivotConfig::default())
    }
}

impl TechnicalIndicator for PivotDetector {
    fn name(&self) -> &str {
        "Pivot Highs/Lows"
    }

    fn compute(&self, data: &OHLCSeries) -> Result<IndicatorOutput> {
        let (lows, highs) = self.calculate(&data.close);
        Ok(IndicatorOutput::dual(lows, highs))
    }

    fn min_periods(&self) -> usize {
        self.left + self.right + 1
    }

    fn output_features(&self) -> usize {
        2
    }
}
