//! Two-pole Butterworth smoother.

use indicator_spi::{TechnicalIndicator, IndicatorOutput, IndicatorError, Result, OHLCSeries};
use indicator_api::ButterworthConfig;
use std::f64::consts::PI;

use crate::series::absent;

/// Recurrence coefficients, derived once per call from the period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButterworthCoefficients {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
}

impl ButterworthCoefficients {
    pub fn for_period(period: f64) -> Self {
        let a1 = (-PI / period).exp();
        let a2 = a1 * a1;
        let b1 = 2.0 * a1 * (PI / period).cos();
        let b2 = -a2;
        let b0 = (1.0 - b1 + a2) / 2.0;
        Self { b0, b1, b2 }
    }
}

/// Two-pole Butterworth low-pass filter.
///
/// `y[i] = b0*x[i] + b0*x[i-1] + b1*y[i-1] + b2*y[i-2]`
///
/// An absent `x[i]` falls back to `x[i-1]` and vice versa; absent feedback
/// terms count as 0. The output is absent only when both inputs are.
#[derive(Debug, Clone)]
pub struct Butterworth {
    period: f64,
}

impl Butterworth {
    pub fn new(period: f64) -> Result<Self> {
        if !(period > 0.0) || !period.is_finite() {
            return Err(IndicatorError::invalid("period", "must be a positive number"));
        }
        Ok(Self { period })
    }

    pub fn from_config(config: ButterworthConfig) -> Result<Self> {
        Self::new(config.period)
    }

    pub fn coefficients(&self) -> ButterworthCoefficients {
        ButterworthCoefficients::for_period(self.period)
    }

    /// Calculate the filtered series.
    pub fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let ButterworthCoefficients { b0, b1, b2 } = self.coefficients();
        let n = data.len();
        let mut y = absent(n);

        let or_zero = |v: f64| if v.is_nan() { 0.0 } else { v };

        for i in 0..n {
            let prev_x = if i > 0 { data[i - 1] } else { f64::NAN };
            let x0 = if data[i].is_nan() { prev_x } else { data[i] };
            let x1 = if i > 0 && !prev_x.is_nan() { prev_x } else { x0 };
            if x0.is_nan() || x1.is_nan() {
                continue;
            }

            let y1 = if i > 0 { or_zero(y[i - 1]) } else { 0.0 };
            let y2 = if i > 1 { or_zero(y[i - 2]) } else { 0.0 };
            y[i] = b0 * x0 + b0 * x1 + b1 * y1 + b2 * y2;
        }

        y
    }
}

impl Default for Butterworth {
    fn default() -> Self {
        Self { period: ButterworthConfig::default().period }
    }
}

impl TechnicalIndicator for Butterworth {
    fn name(&self) -> &str {
        "Butterworth"
    }

    fn compute(&self, data: &OHLCSeries) -> Result<IndicatorOutput> {
        Ok(IndicatorOutput::single(self.calculate(&data.close)))
    }

    fn min_periods(&self) -> usize {
        1
    }
}
