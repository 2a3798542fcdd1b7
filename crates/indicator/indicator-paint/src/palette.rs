//! Default colors of the overlay indicators.

use crate::color::Color;

// RSI divergences
pub const RSI_LINE: Color = Color::rgb(0xFF, 0xA5, 0x00);
pub const RSI_GUIDE: Color = Color::rgb(0x78, 0x7B, 0x86);
pub const BULL: Color = Color::rgb(0x00, 0xC2, 0x7A);
pub const BEAR: Color = Color::rgb(0xE0, 0x5A, 0x5A);
pub const HIDDEN_BULL: Color = Color::rgb(0x61, 0xD8, 0xA6);
pub const HIDDEN_BEAR: Color = Color::rgb(0xF0, 0x8C, 0x8C);

// Hurst regimes
pub const STRONG_TREND: Color = Color::rgb(0x00, 0xBF, 0xFF);
pub const WEAK_TREND: Color = Color::rgb(0x46, 0x82, 0xB4);
pub const WEAK_REVERT: Color = Color::rgb(0xFF, 0xA5, 0x00);
pub const STRONG_REVERT: Color = Color::rgb(0xFF, 0x00, 0x00);
pub const UNDEFINED: Color = Color::rgb(0x99, 0x99, 0x99);
pub const RAW_TRENDING: Color = Color::rgb(0x00, 0xFF, 0x00);
pub const RAW_REVERTING: Color = Color::rgb(0xFF, 0x00, 0x00);
pub const GUIDE_MID: Color = Color::rgb(0xFF, 0xFF, 0xFF);
pub const GUIDE_BAND: Color = Color::rgb(0x88, 0x88, 0x88);

// Trend strength
pub const STRONG_DOWN: Color = Color::rgb(0xFF, 0x00, 0x7A);
pub const MILD_DOWN: Color = Color::rgb(0xFF, 0x7F, 0x50);
pub const NEUTRAL: Color = Color::rgb(0xC6, 0xC5, 0xC5);
pub const MILD_UP: Color = Color::rgb(0x39, 0xFF, 0x14);
pub const STRONG_UP: Color = Color::rgb(0x00, 0xFF, 0xFF);

// Returns distribution
pub const RETURNS_POSITIVE: Color = Color::rgba(0x00, 0xE6, 0x76, 0xD9);
pub const RETURNS_NEGATIVE: Color = Color::rgba(0xFF, 0x17, 0x44, 0xD9);
pub const RETURNS_CURRENT: Color = Color::rgb(0x03, 0xA9, 0xF4);
pub const EXTREME_BORDER: Color = Color::rgb(0xFF, 0xD1, 0x66);
pub const CURRENT_BORDER: Color = Color::rgb(0xFF, 0xFF, 0xFF);
pub const BIN_BORDER: Color = Color::rgb(0x2A, 0x2F, 0x3A);
