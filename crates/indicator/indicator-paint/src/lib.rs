//! Indicator Presentation Policies
//!
//! Pure mappings from indicator values to colors and plot styles. Nothing
//! here feeds back into computation.

pub mod color;
pub mod palette;
pub mod regime;
pub mod trend;
pub mod plot;

// Re-exports
pub use color::{clamp01, gradient, Color};
pub use regime::{raw_hurst_color, HurstRegime, HURST_MID};
pub use trend::TrendPalette;
pub use plot::{ColorSpec, Plot, PlotStyle};
