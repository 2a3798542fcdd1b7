//! Technical Indicator Service Provider Interface
//!
//! Defines traits and types shared by the overlay indicator engines.
//!
//! Every series in this workspace is a `Vec<f64>` index-aligned with the bar
//! sequence. `f64::NAN` is the only absent marker: warm-up windows, undefined
//! inputs and gaps are NaN, never zero.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Indicator errors.
#[derive(Debug, Error, PartialEq)]
pub enum IndicatorError {
    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Length mismatch: {field} has {got} values, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        got: usize,
    },
}

impl IndicatorError {
    /// Shorthand for [`IndicatorError::InvalidParameter`].
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        IndicatorError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IndicatorError>;

// ============================================================================
// OHLC Types
// ============================================================================

/// One OHLC (Open, High, Low, Close) bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OHLC {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OHLC {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { open, high, low, close }
    }

    /// Typical price: (High + Low + Close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Index-aligned OHLC arrays, as supplied by the host bar feed.
#[derive(Debug, Clone, PartialEq)]
pub struct OHLCSeries {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl OHLCSeries {
    pub fn new() -> Self {
        Self {
            open: Vec::new(),
            high: Vec::new(),
            low: Vec::new(),
            close: Vec::new(),
        }
    }

    /// Build from four arrays, rejecting misaligned input.
    pub fn from_arrays(
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
    ) -> Result<Self> {
        let series = Self { open, high, low, close };
        series.validate()?;
        Ok(series)
    }

    pub fn from_close(close: Vec<f64>) -> Self {
        Self {
            open: close.clone(),
            high: close.clone(),
            low: close.clone(),
            close,
        }
    }

    pub fn from_bars(bars: &[OHLC]) -> Self {
        let mut series = Self::with_capacity(bars.len());
        for bar in bars {
            series.push(*bar);
        }
        series
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            open: Vec::with_capacity(capacity),
            high: Vec::with_capacity(capacity),
            low: Vec::with_capacity(capacity),
            close: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, bar: OHLC) {
        self.open.push(bar.open);
        self.high.push(bar.high);
        self.low.push(bar.low);
        self.close.push(bar.close);
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Check that all four arrays share the close array's length.
    pub fn validate(&self) -> Result<()> {
        let expected = self.close.len();
        for (field, len) in [
            ("open", self.open.len()),
            ("high", self.high.len()),
            ("low", self.low.len()),
        ] {
            if len != expected {
                return Err(IndicatorError::LengthMismatch {
                    field,
                    expected,
                    got: len,
                });
            }
        }
        Ok(())
    }
}

impl Default for OHLCSeries {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Indicator Output
// ============================================================================

/// Output from an indicator computation.
#[derive(Debug, Clone)]
pub struct IndicatorOutput {
    /// Primary output series (required).
    pub primary: Vec<f64>,
    /// Optional secondary output (e.g., smoothed line).
    pub secondary: Option<Vec<f64>>,
    /// Optional tertiary output (e.g., centered deviation).
    pub tertiary: Option<Vec<f64>>,
}

impl IndicatorOutput {
    /// Single-output indicator.
    pub fn single(values: Vec<f64>) -> Self {
        Self {
            primary: values,
            secondary: None,
            tertiary: None,
        }
    }

    /// Dual-output indicator.
    pub fn dual(primary: Vec<f64>, secondary: Vec<f64>) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
            tertiary: None,
        }
    }

    /// Triple-output indicator.
    pub fn triple(primary: Vec<f64>, secondary: Vec<f64>, tertiary: Vec<f64>) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
            tertiary: Some(tertiary),
        }
    }
}

// ============================================================================
// Core Traits
// ============================================================================

/// Technical indicator trait.
///
/// Implementations recompute the full series from index 0 on every call.
/// Windows longer than the available history yield NaN, not an error.
pub trait TechnicalIndicator: Send + Sync {
    /// Indicator name.
    fn name(&self) -> &str;

    /// Compute indicator values.
    fn compute(&self, data: &OHLCSeries) -> Result<IndicatorOutput>;

    /// Bars needed before the first defined output.
    fn min_periods(&self) -> usize;

    /// Number of output features.
    fn output_features(&self) -> usize {
        1
    }

    /// Compute from close prices only.
    fn compute_close(&self, close: &[f64]) -> Result<IndicatorOutput> {
        self.compute(&OHLCSeries::from_close(close.to_vec()))
    }
}

// ============================================================================
// Signal Integration
// ============================================================================

/// Signal direction from indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorSignal {
    Bullish,
    Bearish,
    Neutral,
}

impl IndicatorSignal {
    /// Convert to numeric signal: Bullish = 1, Bearish = -1, Neutral = 0.
    pub fn to_numeric(&self) -> f64 {
        match self {
            IndicatorSignal::Bullish => 1.0,
            IndicatorSignal::Bearish => -1.0,
            IndicatorSignal::Neutral => 0.0,
        }
    }
}
