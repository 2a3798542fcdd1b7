//! RGBA colors and linear interpolation between them.

use std::fmt;
use std::str::FromStr;

use indicator_spi::{IndicatorError, Result};
use serde::{Deserialize, Serialize};

/// An sRGB color with alpha.
///
/// Serialized as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`; the leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(IndicatorError::invalid("color", format!("not a hex color: {hex}")));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| IndicatorError::invalid("color", format!("not a hex color: {hex}")))
        };
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Uppercase hex form.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Same color with `opacity` percent (0..=100) alpha.
    pub fn with_opacity(self, opacity: u8) -> Self {
        let a = (opacity.min(100) as f64 * 255.0 / 100.0).round() as u8;
        Self { a, ..self }
    }

    /// Per-channel interpolation towards `other`, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = clamp01(t);
        let mix = |from: u8, to: u8| {
            let v = from as f64 + (to as f64 - from as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Clamp to `[0, 1]`. NaN maps to 0.
pub fn clamp01(t: f64) -> f64 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Position of `v` within `[lo, hi]` mapped onto `c_lo..c_hi`.
///
/// Absent `v` has no color.
pub fn gradient(v: f64, lo: f64, hi: f64, c_lo: Color, c_hi: Color) -> Option<Color> {
    if v.is_nan() {
        return None;
    }
    Some(c_lo.lerp(c_hi, (v - lo) / (hi - lo)))
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = IndicatorError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}
