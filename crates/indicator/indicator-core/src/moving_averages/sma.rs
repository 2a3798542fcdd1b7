//! Simple Moving Average implementation.

use indicator_spi::{TechnicalIndicator, IndicatorOutput, Result, OHLCSeries};
use indicator_api::SMAConfig;

use crate::series::is_present;

/// Simple Moving Average (SMA).
///
/// Mean of the present values among the trailing `period` slots. Absent
/// values are skipped but still occupy a slot, so the window always spans
/// exactly `period` bars.
#[derive(Debug, Clone)]
pub struct SMA {
    period: usize,
}

impl SMA {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn from_config(config: SMAConfig) -> Self {
        Self { period: config.period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Calculate SMA values.
    ///
    /// Output is defined once a full window has elapsed and it holds at
    /// least one present value.
    pub fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let n = data.len();
        let mut result = vec![f64::NAN; n];
        if self.period == 0 {
            return result;
        }

        let mut sum = 0.0;
        let mut count = 0usize;

        for i in 0..n {
            let v = data[i];
            if is_present(v) {
                sum += v;
                count += 1;
            }
            if i >= self.period {
                let old = data[i - self.period];
                if is_present(old) {
                    sum -= old;
                    count -= 1;
                }
            }
            if i + 1 >= self.period && count > 0 {
                result[i] = sum / count as f64;
            }
        }

        result
    }
}

impl TechnicalIndicator for SMA {
    fn name(&self) -> &str {
        "SMA"
    }

    fn compute(&self, data: &OHLCSeries) -> Result<IndicatorOutput> {
        Ok(IndicatorOutput::single(self.calculate(&data.close)))
    }

    fn min_periods(&self) -> usize {
        self.period
    }
}
