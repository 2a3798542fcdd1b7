//! RSI Divergences implementation.
//!
//! Wilder RSI over a selectable price source, fed through the divergence
//! engine with price extremes taken from the bar highs and lows.

use indicator_api::RSIDivergenceConfig;
use indicator_core::RSI;
use indicator_paint::{palette, Color, Plot};
use indicator_spi::{IndicatorOutput, OHLCSeries, Result, TechnicalIndicator};
use indicator_swing::{DivergenceEngine, DivergenceKind, DivergenceOutput};
use tracing::debug;

const MIDLINE: f64 = 50.0;
const MIDLINE_OPACITY: u8 = 40;
const BAND_OPACITY: u8 = 25;

const REGULAR_OPACITY: u8 = 80;
const HIDDEN_OPACITY: u8 = 50;
const FORMING_OPACITY: u8 = 65;

/// RSI Divergences output.
#[derive(Debug, Clone)]
pub struct RsiDivergenceOutput {
    pub rsi: Vec<f64>,
    pub divergence: DivergenceOutput,
}

impl RsiDivergenceOutput {
    /// +1 at bullish and -1 at bearish confirmed divergences, 0 elsewhere.
    pub fn signal(&self) -> Vec<f64> {
        let mut signal = vec![0.0; self.rsi.len()];
        for event in self.divergence.events.iter().filter(|e| !e.kind.is_forming()) {
            signal[event.to.index] = event.kind.signal().to_numeric();
        }
        signal
    }
}

/// RSI Divergences.
#[derive(Debug, Clone)]
pub struct RsiDivergence {
    config: RSIDivergenceConfig,
    rsi: RSI,
    engine: DivergenceEngine,
}

impl RsiDivergence {
    pub fn new(config: RSIDivergenceConfig) -> Result<Self> {
        config.validate()?;
        let rsi = RSI::from_config(config.rsi.clone());
        let engine = DivergenceEngine::from_config(config.pivot.clone(), config.divergence.clone())?;
        Ok(Self { config, rsi, engine })
    }

    pub fn config(&self) -> &RSIDivergenceConfig {
        &self.config
    }

    /// Full pass over `data`.
    pub fn calculate(&self, data: &OHLCSeries) -> Result<RsiDivergenceOutput> {
        data.validate()?;
        let rsi = self.rsi.compute(data)?.primary;
        let divergence = self.engine.run(&rsi, &data.high, &data.low)?;
        debug!(bars = data.len(), events = divergence.events.len(), "rsi divergences");
        Ok(RsiDivergenceOutput { rsi, divergence })
    }

    /// Plots in drawing order: guides, RSI, divergence lines, markers.
    pub fn plots(&self, output: &RsiDivergenceOutput) -> Vec<Plot> {
        let n = output.rsi.len();
        let divergence = &self.config.divergence;
        let width = self.config.line_width.0;
        let mut plots = Vec::new();

        let guides = [
            (MIDLINE, MIDLINE_OPACITY),
            (self.config.rsi.overbought, BAND_OPACITY),
            (self.config.rsi.oversold, BAND_OPACITY),
        ];
        for (level, opacity) in guides {
            plots.push(
                Plot::guide(format!("Guide {level}"), level, n, palette::RSI_GUIDE)
                    .with_opacity(opacity),
            );
        }
        plots.push(Plot::line("RSI", output.rsi.clone(), palette::RSI_LINE).with_thickness(2));

        let mode = divergence.signal_mode;
        let lines = [
            (DivergenceKind::RegularBullish, "Regular Bullish", palette::BULL, REGULAR_OPACITY),
            (DivergenceKind::RegularBearish, "Regular Bearish", palette::BEAR, REGULAR_OPACITY),
            (DivergenceKind::HiddenBullish, "Hidden Bullish", palette::HIDDEN_BULL, HIDDEN_OPACITY),
            (DivergenceKind::HiddenBearish, "Hidden Bearish", palette::HIDDEN_BEAR, HIDDEN_OPACITY),
        ];
        for (kind, name, color, opacity) in lines {
            let values = if divergence.show_lines && kind.is_wanted(mode) {
                output.divergence.lines.get(kind).to_vec()
            } else {
                vec![f64::NAN; n]
            };
            plots.push(line_plot(name, values, color, width, opacity));
        }

        if divergence.show_forming {
            for (kind, name, color) in [
                (DivergenceKind::FormingBullish, "Forming Bullish", palette::BULL),
                (DivergenceKind::FormingBearish, "Forming Bearish", palette::BEAR),
            ] {
                let values = output.divergence.lines.get(kind).to_vec();
                plots.push(line_plot(name, values, color, width, FORMING_OPACITY));
            }
        }

        if divergence.show_markers {
            for (kind, name, color) in [
                (DivergenceKind::RegularBullish, "Bullish Marker", palette::BULL),
                (DivergenceKind::RegularBearish, "Bearish Marker", palette::BEAR),
                (DivergenceKind::HiddenBullish, "Hidden Bullish Marker", palette::HIDDEN_BULL),
                (DivergenceKind::HiddenBearish, "Hidden Bearish Marker", palette::HIDDEN_BEAR),
            ] {
                if let Some(values) = output.divergence.markers.get(kind) {
                    plots.push(Plot::points(name, values.to_vec(), color).with_thickness(width));
                }
            }
        }

        plots
    }
}

fn line_plot(name: &str, values: Vec<f64>, color: Color, width: u8, opacity: u8) -> Plot {
    Plot::line(name, values, color)
        .with_thickness(width)
        .with_opacity(opacity)
}

impl TechnicalIndicator for RsiDivergence {
    fn name(&self) -> &str {
        "RSI Divergences"
    }

    fn compute(&self, data: &OHLCSeries) -> Result<IndicatorOutput> {
        let output = self.calculate(data)?;
        let signal = output.signal();
        Ok(IndicatorOutput::dual(output.rsi, signal))
    }

    fn min_periods(&self) -> usize {
        self.config.rsi.period + 1 + self.config.pivot.left + self.config.pivot.right
    }

    fn output_features(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicator_api::{DivergenceConfig, FormingProbe, PivotConfig, RSIConfig, SignalMode};

    fn zigzag(n: usize) -> OHLCSeries {
        let close: Vec<f64> = (0..n)
            .map(|i| 100.0 + (i as f64 * 0.35).sin() * 8.0 - i as f64 * 0.05)
            .collect();
        let high = close.iter().map(|c| c + 1.0).collect();
        let low = close.iter().map(|c| c - 1.0).collect();
        OHLCSeries::from_arrays(close.clone(), high, low, close).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = RSIDivergenceConfig::default();
        config.pivot = PivotConfig::new(0, 7);
        assert!(RsiDivergence::new(config).is_err());
    }

    #[test]
    fn test_plot_layout() {
        let indicator = RsiDivergence::new(RSIDivergenceConfig::default()).unwrap();
        let data = zigzag(200);
        let output = indicator.calculate(&data).unwrap();
        let plots = indicator.plots(&output);

        // 3 guides + RSI + 4 lines + 2 forming + 4 markers.
        assert_eq!(plots.len(), 14);
        assert!(plots.iter().all(|p| p.len() == 200));
        assert_eq!(plots[3].name, "RSI");
        assert_eq!(plots[0].values[0], 50.0);
        assert_eq!(plots[0].opacity, Some(40));
        // Hidden lines are blank in regular-only mode.
        assert_eq!(plots[6].drawn_points(), 0);
        assert_eq!(plots[7].drawn_points(), 0);
    }

    #[test]
    fn test_guides_follow_rsi_config() {
        let mut config = RSIDivergenceConfig::default();
        config.rsi.overbought = 80.0;
        config.rsi.oversold = 20.0;
        let indicator = RsiDivergence::new(config).unwrap();
        let output = indicator.calculate(&zigzag(60)).unwrap();
        let plots = indicator.plots(&output);

        assert_eq!(plots[0].values[0], 50.0);
        assert_eq!(plots[1].values[0], 80.0);
        assert_eq!(plots[1].name, "Guide 80");
        assert_eq!(plots[2].values[59], 20.0);
        assert_eq!(plots[2].opacity, Some(25));
    }

    #[test]
    fn test_toggles_drop_plots() {
        let mut config = RSIDivergenceConfig::default();
        config.divergence.show_forming = false;
        config.divergence.show_markers = false;
        let indicator = RsiDivergence::new(config).unwrap();
        let output = indicator.calculate(&zigzag(120)).unwrap();

        assert_eq!(indicator.plots(&output).len(), 8);
    }

    #[test]
    fn test_signal_matches_events() {
        let config = RSIDivergenceConfig {
            rsi: RSIConfig::new(5),
            pivot: PivotConfig::new(2, 2),
            divergence: DivergenceConfig::default()
                .with_range(2, 60)
                .with_signal_mode(SignalMode::All)
                .with_forming_probe(FormingProbe::FixedOffset { offset: 0 }),
            ..Default::default()
        };
        let indicator = RsiDivergence::new(config).unwrap();
        let data = zigzag(300);
        let output = indicator.calculate(&data).unwrap();
        let signal = output.signal();

        for event in output.divergence.events.iter().filter(|e| !e.kind.is_forming()) {
            assert_eq!(signal[event.to.index], event.kind.signal().to_numeric());
        }
        let computed = indicator.compute(&data).unwrap();
        assert_eq!(computed.secondary.unwrap(), signal);
    }
}
