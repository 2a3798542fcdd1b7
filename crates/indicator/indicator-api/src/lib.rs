//! Technical Indicator API
//!
//! Configuration types and parameter selectors for the indicator engines.

pub mod config;

pub use config::*;
