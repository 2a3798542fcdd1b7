//! Returns Distribution histogram chart.
//!
//! Wraps the core returns summary with per-bin fill and border styling. The
//! bin holding the newest return is highlighted, with a distinct border when
//! that return sets a new extreme.

use indicator_api::ReturnsDistributionConfig;
use indicator_core::{HistogramBin, ReturnsDistribution, ReturnsSummary};
use indicator_paint::{palette, Color};
use indicator_spi::{IndicatorOutput, OHLCSeries, Result, TechnicalIndicator};
use serde::Serialize;
use tracing::debug;

const CURRENT_EXTREME_BORDER_WIDTH: f64 = 2.0;
const CURRENT_BORDER_WIDTH: f64 = 1.5;
const BIN_BORDER_WIDTH: f64 = 0.5;

/// One styled histogram bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBar {
    pub label: String,
    pub start: f64,
    pub end: f64,
    pub count: usize,
    pub color: Color,
    pub border_color: Color,
    pub border_width: f64,
}

/// Chart-ready distribution: summary statistics plus styled bars.
#[derive(Debug, Clone, Serialize)]
pub struct ReturnsChart {
    pub summary: ReturnsSummary,
    pub bars: Vec<HistogramBar>,
}

impl ReturnsChart {
    /// The bar holding the newest return.
    pub fn current_bar(&self) -> Option<&HistogramBar> {
        self.bars.get(self.summary.current_bin)
    }
}

/// Returns Distribution indicator.
#[derive(Debug, Clone)]
pub struct ReturnsHistogram {
    config: ReturnsDistributionConfig,
    engine: ReturnsDistribution,
}

impl ReturnsHistogram {
    pub fn new(config: ReturnsDistributionConfig) -> Result<Self> {
        config.validate()?;
        let engine = ReturnsDistribution::from_config(config.clone());
        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &ReturnsDistributionConfig {
        &self.config
    }

    /// Summarize and style the returns of `close`.
    pub fn calculate(&self, close: &[f64]) -> Result<ReturnsChart> {
        let summary = self.engine.calculate(close)?;
        let bars = summary
            .bins
            .iter()
            .enumerate()
            .map(|(i, bin)| style_bin(bin, i == summary.current_bin, summary.is_new_extreme()))
            .collect();

        debug!(
            sample = summary.sample_size,
            current = summary.current,
            bin = summary.current_bin,
            extreme = summary.is_new_extreme(),
            "returns distribution"
        );
        Ok(ReturnsChart { summary, bars })
    }
}

impl Default for ReturnsHistogram {
    fn default() -> Self {
        let config = ReturnsDistributionConfig::default();
        let engine = ReturnsDistribution::from_config(config.clone());
        Self { config, engine }
    }
}

fn style_bin(bin: &HistogramBin, is_current: bool, is_extreme: bool) -> HistogramBar {
    let (color, border_color, border_width) = if is_current {
        if is_extreme {
            (palette::RETURNS_CURRENT, palette::EXTREME_BORDER, CURRENT_EXTREME_BORDER_WIDTH)
        } else {
            (palette::RETURNS_CURRENT, palette::CURRENT_BORDER, CURRENT_BORDER_WIDTH)
        }
    } else if bin.center() >= 0.0 {
        (palette::RETURNS_POSITIVE, palette::BIN_BORDER, BIN_BORDER_WIDTH)
    } else {
        (palette::RETURNS_NEGATIVE, palette::BIN_BORDER, BIN_BORDER_WIDTH)
    };

    HistogramBar {
        label: bin.label.clone(),
        start: bin.start,
        end: bin.end,
        count: bin.count,
        color,
        border_color,
        border_width,
    }
}

impl TechnicalIndicator for ReturnsHistogram {
    fn name(&self) -> &str {
        "Returns Distribution"
    }

    /// Bin counts as primary, bin starts as secondary.
    fn compute(&self, data: &OHLCSeries) -> Result<IndicatorOutput> {
        let chart = self.calculate(&data.close)?;
        let counts = chart.bars.iter().map(|b| b.count as f64).collect();
        let starts = chart.bars.iter().map(|b| b.start).collect();
        Ok(IndicatorOutput::dual(counts, starts))
    }

    fn min_periods(&self) -> usize {
        // Two historical returns plus the current one.
        4
    }

    fn output_features(&self) -> usize {
        2
    }
}
