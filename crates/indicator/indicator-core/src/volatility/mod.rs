//! Volatility Indicators

pub mod atr;

pub use atr::ATR;
