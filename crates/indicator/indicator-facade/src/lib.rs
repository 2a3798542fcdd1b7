//! Technical Indicator Facade
//!
//! Unified re-exports for the indicator module.

// Re-export everything from SPI
pub use indicator_spi::*;

// Re-export everything from API
pub use indicator_api::*;

// Re-export everything from Core
pub use indicator_core::*;

// Pivots and divergences
pub use indicator_swing::*;

// Colors and plot metadata
pub use indicator_paint::*;

// Full overlay indicators
pub use indicator_composite::*;
