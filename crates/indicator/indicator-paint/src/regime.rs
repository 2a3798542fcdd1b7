//! Hurst regime banding.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::palette;

/// Random-walk midpoint of the Hurst exponent.
pub const HURST_MID: f64 = 0.5;

/// Persistence regime of a smoothed Hurst value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HurstRegime {
    StrongTrend,
    WeakTrend,
    WeakReversion,
    StrongReversion,
    Undefined,
}

impl HurstRegime {
    /// Band `value` against `lower < 0.5 < upper`.
    ///
    /// `> upper` wins over `> 0.5`, and `< lower` over the weak band.
    pub fn classify(value: f64, lower: f64, upper: f64) -> Self {
        if value.is_nan() {
            HurstRegime::Undefined
        } else if value > upper {
            HurstRegime::StrongTrend
        } else if value > HURST_MID {
            HurstRegime::WeakTrend
        } else if value < lower {
            HurstRegime::StrongReversion
        } else {
            HurstRegime::WeakReversion
        }
    }

    pub fn color(&self) -> Color {
        match self {
            HurstRegime::StrongTrend => palette::STRONG_TREND,
            HurstRegime::WeakTrend => palette::WEAK_TREND,
            HurstRegime::WeakReversion => palette::WEAK_REVERT,
            HurstRegime::StrongReversion => palette::STRONG_REVERT,
            HurstRegime::Undefined => palette::UNDEFINED,
        }
    }

    pub fn is_trending(&self) -> bool {
        matches!(self, HurstRegime::StrongTrend | HurstRegime::WeakTrend)
    }
}

/// Two-color scheme for the raw Hurst line. Absent counts as reverting.
pub fn raw_hurst_color(value: f64) -> Color {
    if value > HURST_MID {
        palette::RAW_TRENDING
    } else {
        palette::RAW_REVERTING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        let c = |v| HurstRegime::classify(v, 0.40, 0.60);
        assert_eq!(c(0.61), HurstRegime::StrongTrend);
        assert_eq!(c(0.60), HurstRegime::WeakTrend);
        assert_eq!(c(0.51), HurstRegime::WeakTrend);
        assert_eq!(c(0.50), HurstRegime::WeakReversion);
        assert_eq!(c(0.40), HurstRegime::WeakReversion);
        assert_eq!(c(0.39), HurstRegime::StrongReversion);
        assert_eq!(c(f64::NAN), HurstRegime::Undefined);
    }

    #[test]
    fn test_colors() {
        assert_eq!(HurstRegime::StrongTrend.color().to_hex(), "#00BFFF");
        assert_eq!(HurstRegime::Undefined.color().to_hex(), "#999999");
        assert_eq!(raw_hurst_color(0.7).to_hex(), "#00FF00");
        assert_eq!(raw_hurst_color(0.5).to_hex(), "#FF0000");
        assert_eq!(raw_hurst_color(f64::NAN).to_hex(), "#FF0000");
        assert!(HurstRegime::WeakTrend.is_trending());
    }
}
