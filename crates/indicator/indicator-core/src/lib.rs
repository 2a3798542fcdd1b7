//! Technical Indicator Core Implementations
//!
//! Batch indicator engines for chart overlays. Each engine recomputes its
//! full output series from the bar arrays; NaN marks an absent value.

// ============================================================================
// Category Modules
// ============================================================================
pub mod series;
pub mod moving_averages;
pub mod filters;
pub mod oscillators;
pub mod volatility;
pub mod statistical;

// ============================================================================
// Indicator Exports
// ============================================================================
pub use moving_averages::{moving_average, SMA, EMA};
pub use filters::{Butterworth, ButterworthCoefficients};
pub use oscillators::RSI;
pub use volatility::ATR;
pub use statistical::{
    HurstExponent, ReturnsDistribution, ReturnsSummary, HistogramBin,
};

// ============================================================================
// Re-export SPI types
// ============================================================================
pub use indicator_spi::{
    TechnicalIndicator, IndicatorOutput, IndicatorSignal, IndicatorError, Result,
    OHLC, OHLCSeries,
};

// ============================================================================
// Re-export API configs
// ============================================================================
pub use indicator_api::{
    SMAConfig, EMAConfig, ButterworthConfig, RSIConfig, ATRConfig,
    HurstConfig, ReturnsDistributionConfig, PriceSource, MovingAverageKind,
};
