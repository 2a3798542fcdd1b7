//! Hurst Exponent implementation.

use indicator_spi::{TechnicalIndicator, IndicatorOutput, Result, OHLCSeries};
use indicator_api::HurstConfig;
use std::f64::consts::LN_2;
use tracing::trace;

use crate::series::{absent, is_present, rolling_max, rolling_min};

/// Windowed Hurst exponent from the fractal dimension of the price path.
///
/// Over the trailing `lookback` closes the path is rescaled to a unit box
/// (time step `1/N`, price range `yMax - yMin`) and its length `L` measured.
/// Then `FDI = 1 + (ln L + ln 2) / ln(2N)` and `H = 2 - FDI`.
///
/// - H > 0.5: persistent/trending
/// - H = 0.5: random walk
/// - H < 0.5: mean-reverting
///
/// A flat window has no range to rescale by, so its path length is fixed
/// at 1.0.
#[derive(Debug, Clone)]
pub struct HurstExponent {
    lookback: usize,
}

impl HurstExponent {
    pub fn new(lookback: usize) -> Self {
        Self { lookback }
    }

    pub fn from_config(config: HurstConfig) -> Self {
        Self::new(config.lookback)
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    /// Hurst value for a given normalized path length.
    pub fn from_path_length(path_length: f64, lookback: usize) -> f64 {
        let fdi = 1.0 + (path_length.ln() + LN_2) / (2.0 * lookback as f64).ln();
        2.0 - fdi
    }

    /// Calculate the Hurst series over close prices.
    pub fn calculate(&self, close: &[f64]) -> Vec<f64> {
        let n = close.len();
        let lookback = self.lookback;
        let y_min = rolling_min(close, lookback);
        let y_max = rolling_max(close, lookback);
        let mut result = absent(n);

        for i in 0..n {
            if i + 1 < lookback || y_min[i].is_nan() || y_max[i].is_nan() {
                continue;
            }
            let path_length = self.path_length(close, i, y_min[i], y_max[i]);
            result[i] = Self::from_path_length(path_length, lookback);
        }

        result
    }

    fn path_length(&self, close: &[f64], i: usize, y_min: f64, y_max: f64) -> f64 {
        let lookback = self.lookback;
        if lookback < 2 || y_max == y_min {
            trace!(bar = i, "flat hurst window");
            return 1.0;
        }

        let scale = y_max - y_min;
        let dx2 = 1.0 / (lookback * lookback) as f64;
        let mut acc = 0.0;

        for j in 1..lookback {
            let newer = close[i - j + 1];
            // A missing sample falls back to its newer neighbour.
            let older = if close[i - j].is_nan() { newer } else { close[i - j] };
            let dy = if scale != 0.0 && is_present(older) && is_present(newer) {
                (older - newer) / scale
            } else {
                0.0
            };
            acc += (dx2 + dy * dy).sqrt();
        }

        acc
    }
}

impl Default for HurstExponent {
    fn default() -> Self {
        Self::from_config(HurstConfig::default())
    }
}

impl TechnicalIndicator for HurstExponent {
    fn name(&self) -> &str {
        "Hurst Exponent"
    }

    fn compute(&self, data: &OHLCSeries) -> Result<IndicatorOutput> {
        Ok(IndicatorOutput::single(self.calculate(&data.close)))
    }

    fn min_periods(&self) -> usize {
        self.lookback
    }
}
