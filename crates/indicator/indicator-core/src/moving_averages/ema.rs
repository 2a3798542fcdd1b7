//! Exponential Moving Average implementation.

use indicator_spi::{TechnicalIndicator, IndicatorOutput, Result, OHLCSeries};
use indicator_api::EMAConfig;

/// Exponential Moving Average (EMA).
///
/// Seeded by the first present input (not by an SMA and not by zero). An
/// absent input repeats the previous output, so gaps are forward-filled
/// rather than skipped.
#[derive(Debug, Clone)]
pub struct EMA {
    period: usize,
    alpha: f64,
}

impl EMA {
    pub fn new(period: usize) -> Self {
        let alpha = 2.0 / (period as f64 + 1.0);
        Self { period, alpha }
    }

    pub fn from_config(config: EMAConfig) -> Self {
        Self {
            period: config.period,
            alpha: config.smoothing_factor(),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Calculate EMA values.
    pub fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let n = data.len();
        let mut result = vec![f64::NAN; n];
        if self.period == 0 {
            return result;
        }

        let mut prev: Option<f64> = None;
        for i in 0..n {
            let v = data[i];
            if v.is_nan() {
                if i > 0 {
                    result[i] = result[i - 1];
                }
                continue;
            }
            let next = match prev {
                None => v,
                Some(p) => self.alpha * v + (1.0 - self.alpha) * p,
            };
            prev = Some(next);
            result[i] = next;
        }

        result
    }
}

impl TechnicalIndicator for EMA {
    fn name(&self) -> &str {
        "EMA"
    }

    fn compute(&self, data: &OHLCSeries) -> Result<IndicatorOutput> {
        Ok(IndicatorOutput::single(self.calculate(&data.close)))
    }

    fn min_periods(&self) -> usize {
        1
    }
}
