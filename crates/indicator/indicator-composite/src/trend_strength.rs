//! Trend Strength Candles implementation.
//!
//! An ATR-scaled trend measurement rescaled to `[-100, 100]` over a rolling
//! window and mapped onto a five-color candle gradient.

use indicator_api::{TrendMethod, TrendStrengthConfig};
use indicator_core::series::{absent, for_every, rolling_max, rolling_min, shift};
use indicator_core::{moving_average, ATR, EMA, SMA};
use indicator_paint::{Color, Plot, PlotStyle, TrendPalette};
use indicator_spi::{IndicatorOutput, OHLCSeries, Result, TechnicalIndicator};
use tracing::debug;

/// Trend Strength output.
#[derive(Debug, Clone)]
pub struct TrendStrengthOutput {
    /// ATR-scaled score of the selected method.
    pub raw: Vec<f64>,
    /// Rolling-normalized score in `[-100, 100]`.
    pub score: Vec<f64>,
    /// Candle color per bar.
    pub colors: Vec<Color>,
}

/// Trend Strength Candles.
///
/// Raw score, by method:
///
/// - **PriceChange**: `(close - close[lookback]) / ATR`
/// - **EmaSlope**: `(EMA - EMA[1]) / ATR`, SMA-smoothed
/// - **MaDistance**: `(MA1 - MA2) / ATR`
///
/// An absent operand or a zero ATR leaves the raw score absent. A flat
/// normalization window scores 0.
#[derive(Debug, Clone)]
pub struct TrendStrengthCandles {
    config: TrendStrengthConfig,
    palette: TrendPalette,
}

impl TrendStrengthCandles {
    pub fn new(config: TrendStrengthConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, palette: TrendPalette::default() })
    }

    pub fn with_palette(mut self, palette: TrendPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn config(&self) -> &TrendStrengthConfig {
        &self.config
    }

    /// Raw ATR-scaled score for the configured method.
    ///
    /// All-absent when `high`/`low` are not aligned with `close`.
    pub fn raw_score(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        if high.len() != close.len() || low.len() != close.len() {
            debug!(close = close.len(), high = high.len(), low = low.len(), "misaligned bars");
            return absent(close.len());
        }
        let c = &self.config;
        let atr = ATR::new(c.atr_len).calculate(high, low, close);

        match c.method {
            TrendMethod::PriceChange => {
                let prev = shift(close, c.pc_lookback);
                for_every(close, |i, v| scaled(v - prev[i], atr[i]))
            }
            TrendMethod::EmaSlope => {
                let ema = EMA::new(c.ema_len).calculate(close);
                let ema_prev = shift(&ema, 1);
                let slope = for_every(&ema, |i, v| scaled(v - ema_prev[i], atr[i]));
                SMA::new(c.ema_slope_smooth).calculate(&slope)
            }
            TrendMethod::MaDistance => {
                let ma1 = moving_average(c.ma1_kind, c.ma1_len, close);
                let ma2 = moving_average(c.ma2_kind, c.ma2_len, close);
                for_every(&ma1, |i, v| scaled(v - ma2[i], atr[i]))
            }
        }
    }

    /// Rescale `raw` against its rolling range to `[-100, 100]`.
    pub fn normalize(&self, raw: &[f64]) -> Vec<f64> {
        let hi = rolling_max(raw, self.config.norm_len);
        let lo = rolling_min(raw, self.config.norm_len);

        for_every(raw, |i, r| {
            if r.is_nan() || hi[i].is_nan() || lo[i].is_nan() {
                return f64::NAN;
            }
            let range = hi[i] - lo[i];
            let norm = if range > 0.0 { 2.0 * ((r - lo[i]) / range) - 1.0 } else { 0.0 };
            norm * 100.0
        })
    }

    /// Calculate trend strength values.
    pub fn calculate(&self, high: &[f64], low: &[f64], close: &[f64]) -> TrendStrengthOutput {
        let raw = self.raw_score(high, low, close);
        let score = self.normalize(&raw);
        let colors = self.palette.colors(&score);

        debug!(
            bars = close.len(),
            method = ?self.config.method,
            last = score.last().copied().unwrap_or(f64::NAN),
            "trend strength"
        );
        TrendStrengthOutput { raw, score, colors }
    }

    /// Candle recoloring plot; values carry the score.
    pub fn plots(&self, output: &TrendStrengthOutput) -> Vec<Plot> {
        vec![Plot::new(
            "Trend Strength",
            output.score.clone(),
            output.colors.clone(),
            PlotStyle::Candles,
        )]
    }
}

/// `diff / atr`, absent when either is absent or ATR is zero.
fn scaled(diff: f64, atr: f64) -> f64 {
    if diff.is_nan() || atr.is_nan() || atr == 0.0 {
        f64::NAN
    } else {
        diff / atr
    }
}

impl TechnicalIndicator for TrendStrengthCandles {
    fn name(&self) -> &str {
        "Trend Strength Candles"
    }

    fn compute(&self, data: &OHLCSeries) -> Result<IndicatorOutput> {
        data.validate()?;
        let output = self.calculate(&data.high, &data.low, &data.close);
        Ok(IndicatorOutput::dual(output.score, output.raw))
    }

    fn min_periods(&self) -> usize {
        let c = &self.config;
        let warmup = match c.method {
            TrendMethod::PriceChange => c.pc_lookback,
            TrendMethod::EmaSlope => c.ema_slope_smooth,
            TrendMethod::MaDistance => c.ma1_len.max(c.ma2_len),
        };
        warmup + c.norm_len
    }

    fn output_features(&self) -> usize {
        2
    }
}
