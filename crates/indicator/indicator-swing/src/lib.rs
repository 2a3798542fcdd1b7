//! Swing Structure Indicators
//!
//! Pivot detection over any series and the divergence engine that pairs
//! oscillator pivots with price extremes.

pub mod pivot;
pub mod segment;
pub mod divergence;

// Re-exports
pub use pivot::{is_pivot_high, is_pivot_low, PivotDetector, PivotType};
pub use segment::{draw_segment, draw_segment_dotted};
pub use divergence::{
    classify_highs, classify_lows, DivergenceEngine, DivergenceEvent, DivergenceKind,
    DivergenceLines, DivergenceMarkers, DivergenceOutput, DivergenceState, Pivot,
};

// Re-export SPI types
pub use indicator_spi::{
    TechnicalIndicator, IndicatorOutput, IndicatorSignal, IndicatorError, Result,
};
