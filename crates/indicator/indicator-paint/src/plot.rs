//! Plot descriptors handed to the rendering host.
//!
//! A plot is a named series plus style. Absent (NaN) points are never drawn;
//! they serialize as JSON `null`.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlotStyle {
    #[default]
    Line,
    Histogram,
    /// Isolated points, e.g. divergence markers.
    Points,
    /// Recolors the price candles; values carry the driving score.
    Candles,
}

/// A single color, or one color per bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Solid(Color),
    PerPoint(Vec<Color>),
}

impl ColorSpec {
    /// Color of bar `i`, if any.
    pub fn at(&self, i: usize) -> Option<Color> {
        match self {
            ColorSpec::Solid(c) => Some(*c),
            ColorSpec::PerPoint(colors) => colors.get(i).copied(),
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(c: Color) -> Self {
        ColorSpec::Solid(c)
    }
}

impl From<Vec<Color>> for ColorSpec {
    fn from(colors: Vec<Color>) -> Self {
        ColorSpec::PerPoint(colors)
    }
}

/// A named, styled series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plot {
    pub name: String,
    pub values: Vec<f64>,
    pub color: ColorSpec,
    pub style: PlotStyle,
    pub thickness: u8,
    /// Percent, 0..=100. `None` draws fully opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<u8>,
}

impl Plot {
    pub fn new(
        name: impl Into<String>,
        values: Vec<f64>,
        color: impl Into<ColorSpec>,
        style: PlotStyle,
    ) -> Self {
        Self {
            name: name.into(),
            values,
            color: color.into(),
            style,
            thickness: 1,
            opacity: None,
        }
    }

    pub fn line(name: impl Into<String>, values: Vec<f64>, color: impl Into<ColorSpec>) -> Self {
        Self::new(name, values, color, PlotStyle::Line)
    }

    pub fn histogram(
        name: impl Into<String>,
        values: Vec<f64>,
        color: impl Into<ColorSpec>,
    ) -> Self {
        Self::new(name, values, color, PlotStyle::Histogram)
    }

    pub fn points(name: impl Into<String>, values: Vec<f64>, color: impl Into<ColorSpec>) -> Self {
        Self::new(name, values, color, PlotStyle::Points)
    }

    /// Horizontal guide at `level` across `len` bars.
    pub fn guide(name: impl Into<String>, level: f64, len: usize, color: Color) -> Self {
        Self::line(name, vec![level; len], color)
    }

    pub fn with_thickness(mut self, thickness: u8) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = Some(opacity.min(100));
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of points that will actually be drawn.
    pub fn drawn_points(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }
}
