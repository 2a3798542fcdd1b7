//! Technical Indicator Composite - Overlay Indicators
//!
//! Full indicators that wire the computation engines to plot metadata.
//!
//! # Composite Indicators
//!
//! - [`RsiDivergence`]: Wilder RSI with regular/hidden divergence detection
//! - [`HurstRegimeDetector`]: Smoothed Hurst exponent banded into regimes
//! - [`TrendStrengthCandles`]: ATR-normalized trend score as candle colors
//! - [`ReturnsHistogram`]: Percent-returns distribution chart
//!
//! # Example
//!
//! ```rust,ignore
//! use indicator_composite::{HurstRegimeDetector, HurstConfig};
//!
//! let detector = HurstRegimeDetector::new(HurstConfig::default())?;
//! let output = detector.calculate(&close);
//! let plots = detector.plots(&output);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod rsi_divergence;
pub mod hurst_regime;
pub mod trend_strength;
pub mod returns_distribution;

// ============================================================================
// Re-exports
// ============================================================================

// RSI Divergences
pub use rsi_divergence::{RsiDivergence, RsiDivergenceOutput};

// Hurst Exponent
pub use hurst_regime::{HurstRegimeDetector, HurstRegimeOutput};

// Trend Strength Candles
pub use trend_strength::{TrendStrengthCandles, TrendStrengthOutput};

// Returns Distribution
pub use returns_distribution::{HistogramBar, ReturnsChart, ReturnsHistogram};

// Configuration
pub use indicator_api::{
    HurstConfig, RSIDivergenceConfig, ReturnsDistributionConfig, TrendStrengthConfig,
};

// Re-export SPI types for convenience
pub use indicator_spi::{
    IndicatorError, IndicatorOutput, IndicatorSignal, OHLCSeries, Result, TechnicalIndicator, OHLC,
};
