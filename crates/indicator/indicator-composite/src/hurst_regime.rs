//! Hurst Exponent regime overlay.
//!
//! Raw windowed Hurst exponent, Butterworth-smoothed, banded into
//! trending/mean-reverting regimes.

use indicator_api::{HurstConfig, HurstDisplay};
use indicator_core::{Butterworth, HurstExponent};
use indicator_paint::{palette, raw_hurst_color, Color, HurstRegime, Plot, HURST_MID};
use indicator_spi::{IndicatorOutput, OHLCSeries, Result, TechnicalIndicator};
use tracing::debug;

/// Hurst regime output.
#[derive(Debug, Clone)]
pub struct HurstRegimeOutput {
    /// Windowed Hurst exponent.
    pub raw: Vec<f64>,
    /// Butterworth-smoothed Hurst exponent.
    pub smoothed: Vec<f64>,
    /// `smoothed - 0.5`.
    pub deviation: Vec<f64>,
    /// Regime of each smoothed value.
    pub regimes: Vec<HurstRegime>,
}

impl HurstRegimeOutput {
    /// Regime at the newest bar.
    pub fn current(&self) -> HurstRegime {
        self.regimes.last().copied().unwrap_or(HurstRegime::Undefined)
    }
}

/// Hurst regime detector.
#[derive(Debug, Clone)]
pub struct HurstRegimeDetector {
    config: HurstConfig,
    hurst: HurstExponent,
    smoother: Butterworth,
}

impl HurstRegimeDetector {
    pub fn new(config: HurstConfig) -> Result<Self> {
        config.validate()?;
        let hurst = HurstExponent::from_config(config.clone());
        let smoother = Butterworth::new(config.smoothing_period)?;
        Ok(Self { config, hurst, smoother })
    }

    pub fn config(&self) -> &HurstConfig {
        &self.config
    }

    /// Calculate the raw, smoothed and centered series over close prices.
    pub fn calculate(&self, close: &[f64]) -> HurstRegimeOutput {
        let raw = self.hurst.calculate(close);
        let smoothed = self.smoother.calculate(&raw);
        let deviation = smoothed.iter().map(|v| v - HURST_MID).collect();
        let regimes: Vec<HurstRegime> = smoothed
            .iter()
            .map(|&v| {
                HurstRegime::classify(v, self.config.lower_threshold, self.config.upper_threshold)
            })
            .collect();

        let output = HurstRegimeOutput { raw, smoothed, deviation, regimes };
        debug!(bars = close.len(), current = ?output.current(), "hurst regime");
        output
    }

    /// Plots for the configured display mode.
    pub fn plots(&self, output: &HurstRegimeOutput) -> Vec<Plot> {
        let n = output.raw.len();
        let width = self.config.line_width.0;
        let lower = self.config.lower_threshold;
        let upper = self.config.upper_threshold;
        let regime_colors: Vec<Color> = output.regimes.iter().map(|r| r.color()).collect();
        let mut plots = Vec::new();

        match self.config.display {
            HurstDisplay::Line => {
                plots.push(guide("Guide: Mid", HURST_MID, n, palette::GUIDE_MID));
                plots.push(guide("Guide: Upper", upper, n, palette::GUIDE_BAND));
                plots.push(guide("Guide: Lower", lower, n, palette::GUIDE_BAND));
            }
            HurstDisplay::Histogram => {
                let upper_dev = upper - HURST_MID;
                let lower_dev = lower - HURST_MID;
                plots.push(guide("Guide: Zero (centered)", 0.0, n, palette::GUIDE_MID));
                if upper_dev != 0.0 {
                    plots.push(guide("Guide: +Dev", upper_dev, n, palette::GUIDE_BAND));
                }
                if lower_dev != 0.0 && lower_dev != upper_dev {
                    plots.push(guide("Guide: -Dev", lower_dev, n, palette::GUIDE_BAND));
                }
            }
        }

        if self.config.show_raw {
            let raw_colors: Vec<Color> = output.raw.iter().map(|&v| raw_hurst_color(v)).collect();
            plots.push(Plot::line("Hurst (raw)", output.raw.clone(), raw_colors).with_thickness(width));
        }

        let smoothed = match self.config.display {
            HurstDisplay::Line => {
                Plot::line("Smoothed Hurst", output.smoothed.clone(), regime_colors)
            }
            HurstDisplay::Histogram => Plot::histogram(
                "Smoothed Hurst (Hist, centered)",
                output.deviation.clone(),
                regime_colors,
            ),
        };
        plots.push(smoothed.with_thickness(width));

        plots
    }
}

fn guide(label: &str, level: f64, len: usize, color: Color) -> Plot {
    Plot::guide(format!("{label} ({level:.3})"), level, len, color)
}

impl TechnicalIndicator for HurstRegimeDetector {
    fn name(&self) -> &str {
        "Hurst Exponent"
    }

    fn compute(&self, data: &OHLCSeries) -> Result<IndicatorOutput> {
        let output = self.calculate(&data.close);
        Ok(IndicatorOutput::triple(output.raw, output.smoothed, output.deviation))
    }

    fn min_periods(&self) -> usize {
        self.hurst.min_periods()
    }

    fn output_features(&self) -> usize {
        3
    }
}
