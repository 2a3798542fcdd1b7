//! True Range and Average True Range.

use indicator_spi::{TechnicalIndicator, IndicatorOutput, Result, OHLCSeries};
use indicator_api::ATRConfig;

use crate::moving_averages::EMA;

/// Average True Range (ATR).
///
/// EMA of True Range, inheriting the EMA's gap carry-forward.
#[derive(Debug, Clone)]
pub struct ATR {
    period: usize,
}

impl ATR {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn from_config(config: ATRConfig) -> Self {
        Self { period: config.period }
    }

    /// True Range for each bar.
    ///
    /// Index 0 is absent (no previous close). Each of `|h-l|`, `|h-pc|` and
    /// `|l-pc|` takes part only when both operands are present; the bar is
    /// absent only when none of them does. Misaligned inputs give an
    /// all-absent series.
    pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        let n = high.len();
        let mut tr = vec![f64::NAN; n];
        if low.len() != n || close.len() != n {
            return tr;
        }

        for i in 1..n {
            let prev_close = close[i - 1];
            let component = |a: f64, b: f64| {
                if a.is_nan() || b.is_nan() {
                    f64::NEG_INFINITY
                } else {
                    (a - b).abs()
                }
            };
            let m = component(high[i], low[i])
                .max(component(high[i], prev_close))
                .max(component(low[i], prev_close));
            if m != f64::NEG_INFINITY {
                tr[i] = m;
            }
        }

        tr
    }

    /// Calculate ATR values.
    pub fn calculate(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        let tr = Self::true_range(high, low, close);
        EMA::new(self.period).calculate(&tr)
    }
}

impl TechnicalIndicator for ATR {
    fn name(&self) -> &str {
        "ATR"
    }

    fn compute(&self, data: &OHLCSeries) -> Result<IndicatorOutput> {
        data.validate()?;
        let values = self.calculate(&data.high, &data.low, &data.close);
        Ok(IndicatorOutput::single(values))
    }

    fn min_periods(&self) -> usize {
        2
    }
}
