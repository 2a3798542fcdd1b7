//! Relative Strength Index implementation.

use indicator_spi::{TechnicalIndicator, IndicatorOutput, Result, OHLCSeries};
use indicator_api::{PriceSource, RSIConfig};

/// Wilder Relative Strength Index (RSI).
///
/// Gains and losses are summed over bars `1..period`, seeded as their mean at
/// `i == period`, then smoothed with Wilder's recurrence. A change with an
/// absent endpoint counts as 0. When the average loss is 0 the ratio is
/// treated as infinite and the output is exactly 100.
#[derive(Debug, Clone)]
pub struct RSI {
    period: usize,
    source: PriceSource,
}

impl RSI {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            source: PriceSource::Close,
        }
    }

    pub fn from_config(config: RSIConfig) -> Self {
        Self {
            period: config.period,
            source: config.source,
        }
    }

    pub fn with_source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Calculate RSI values.
    pub fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let n = data.len();
        let mut result = vec![f64::NAN; n];
        if self.period == 0 {
            return result;
        }

        let len = self.period as f64;
        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;

        for i in 1..n {
            let change = if data[i].is_nan() || data[i - 1].is_nan() {
                0.0
            } else {
                data[i] - data[i - 1]
            };
            let up = change.max(0.0);
            let down = (-change).max(0.0);

            if i < self.period {
                avg_gain += up;
                avg_loss += down;
                continue;
            }

            if i == self.period {
                avg_gain = (avg_gain + up) / len;
                avg_loss = (avg_loss + down) / len;
            } else {
                avg_gain = (avg_gain * (len - 1.0) + up) / len;
                avg_loss = (avg_loss * (len - 1.0) + down) / len;
            }
            result[i] = Self::rsi_value(avg_gain, avg_loss);
        }

        result
    }

    fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            return 100.0;
        }
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

impl TechnicalIndicator for RSI {
    fn name(&self) -> &str {
        "RSI"
    }

    fn compute(&self, data: &OHLCSeries) -> Result<IndicatorOutput> {
        data.validate()?;
        let src = self.source.extract(data);
        Ok(IndicatorOutput::single(self.calculate(&src)))
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }
}
