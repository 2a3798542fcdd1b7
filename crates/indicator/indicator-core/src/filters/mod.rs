//! Smoothing Filters

pub mod butterworth;

pub use butterworth::{Butterworth, ButterworthCoefficients};
