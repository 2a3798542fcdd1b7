//! Statistical Indicators

pub mod hurst;
pub mod returns_distribution;

pub use hurst::HurstExponent;
pub use returns_distribution::{HistogramBin, ReturnsDistribution, ReturnsSummary};
