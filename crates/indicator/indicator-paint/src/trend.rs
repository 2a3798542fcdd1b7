//! Trend-score gradient coloring.

use serde::{Deserialize, Serialize};

use crate::color::{gradient, Color};
use crate::palette;

/// Five anchor colors spread over the `[-100, 100]` trend score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendPalette {
    pub strong_down: Color,
    pub mild_down: Color,
    pub neutral: Color,
    pub mild_up: Color,
    pub strong_up: Color,
}

impl Default for TrendPalette {
    fn default() -> Self {
        Self {
            strong_down: palette::STRONG_DOWN,
            mild_down: palette::MILD_DOWN,
            neutral: palette::NEUTRAL,
            mild_up: palette::MILD_UP,
            strong_up: palette::STRONG_UP,
        }
    }
}

impl TrendPalette {
    /// Color for one score, or `None` when the score is absent.
    ///
    /// Bands: `[-100, -50]`, `(-50, 0]`, `(0, 50]`, `(50, 100]`.
    pub fn color_for(&self, score: f64) -> Option<Color> {
        if score.is_nan() {
            None
        } else if score <= -50.0 {
            gradient(score, -100.0, -50.0, self.strong_down, self.mild_down)
        } else if score <= 0.0 {
            gradient(score, -50.0, 0.0, self.mild_down, self.neutral)
        } else if score <= 50.0 {
            gradient(score, 0.0, 50.0, self.neutral, self.mild_up)
        } else {
            gradient(score, 50.0, 100.0, self.mild_up, self.strong_up)
        }
    }

    /// Per-bar colors. An absent score keeps the previous bar's color; the
    /// first bar falls back to neutral.
    pub fn colors(&self, scores: &[f64]) -> Vec<Color> {
        let mut out: Vec<Color> = Vec::with_capacity(scores.len());
        for &score in scores {
            let prev = out.last().copied().unwrap_or(self.neutral);
            out.push(self.color_for(score).unwrap_or(prev));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_points() {
        let p = TrendPalette::default();
        assert_eq!(p.color_for(-100.0), Some(palette::STRONG_DOWN));
        assert_eq!(p.color_for(-50.0), Some(palette::MILD_DOWN));
        assert_eq!(p.color_for(0.0), Some(palette::NEUTRAL));
        assert_eq!(p.color_for(50.0), Some(palette::MILD_UP));
        assert_eq!(p.color_for(100.0), Some(palette::STRONG_UP));
        assert_eq!(p.color_for(f64::NAN), None);
    }

    #[test]
    fn test_midband() {
        let p = TrendPalette::default();
        // Halfway between #C6C5C5 and #39FF14.
        assert_eq!(p.color_for(25.0).map(|c| c.to_hex()).as_deref(), Some("#80E26D"));
    }

    #[test]
    fn test_carry_forward() {
        let p = TrendPalette::default();
        let colors = p.colors(&[f64::NAN, 100.0, f64::NAN, f64::NAN, -100.0]);

        assert_eq!(colors[0], palette::NEUTRAL);
        assert_eq!(colors[1], palette::STRONG_UP);
        assert_eq!(colors[2], palette::STRONG_UP);
        assert_eq!(colors[3], palette::STRONG_UP);
        assert_eq!(colors[4], palette::STRONG_DOWN);
    }
}
