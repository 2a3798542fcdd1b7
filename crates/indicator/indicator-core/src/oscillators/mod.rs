//! Oscillators

pub mod rsi;

pub use rsi::RSI;
