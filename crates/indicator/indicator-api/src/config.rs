//! Indicator configuration types.
//!
//! Every struct deserializes with `#[serde(default)]`, so a partial document
//! only overrides the fields it names.

use indicator_spi::{IndicatorError, OHLCSeries, Result};
use serde::{Deserialize, Serialize};

fn require_at_least(name: &str, value: usize, min: usize) -> Result<()> {
    if value < min {
        return Err(IndicatorError::invalid(name, format!("must be at least {}", min)));
    }
    Ok(())
}

// ============================================================================
// Selectors
// ============================================================================

/// Price used as oscillator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    #[default]
    Close,
    /// (High + Low + Close) / 3
    #[serde(alias = "typical")]
    Hlc3,
    /// (Open + High + Low + Close) / 4
    Ohlc4,
    /// (Open + 2 * Close + High + Low) / 5
    Weighted,
}

impl PriceSource {
    /// Price of a single bar.
    pub fn price(&self, open: f64, high: f64, low: f64, close: f64) -> f64 {
        match self {
            PriceSource::Close => close,
            PriceSource::Hlc3 => (high + low + close) / 3.0,
            PriceSource::Ohlc4 => (open + high + low + close) / 4.0,
            PriceSource::Weighted => (open + 2.0 * close + high + low) / 5.0,
        }
    }

    /// Source series for every bar. NaN operands yield NaN.
    pub fn extract(&self, data: &OHLCSeries) -> Vec<f64> {
        (0..data.len())
            .map(|i| self.price(data.open[i], data.high[i], data.low[i], data.close[i]))
            .collect()
    }
}

/// Which divergence classes are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SignalMode {
    #[default]
    RegularOnly,
    HiddenOnly,
    All,
    None,
}

impl SignalMode {
    pub fn wants_regular(&self) -> bool {
        matches!(self, SignalMode::RegularOnly | SignalMode::All)
    }

    pub fn wants_hidden(&self) -> bool {
        matches!(self, SignalMode::HiddenOnly | SignalMode::All)
    }
}

/// How the provisional ("forming") pivot is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormingProbe {
    /// Candidate is the bar `offset` bars behind the newest one.
    FixedOffset { offset: usize },
    /// Newest-first scan for a `(window, window)` pivot, at most `depth` bars deep.
    BackwardScan { window: usize, depth: usize },
}

impl FormingProbe {
    pub fn validate(&self) -> Result<()> {
        match *self {
            FormingProbe::FixedOffset { .. } => Ok(()),
            FormingProbe::BackwardScan { window, depth } => {
                require_at_least("forming_probe.window", window, 1)?;
                require_at_least("forming_probe.depth", depth, 1)
            }
        }
    }
}

impl Default for FormingProbe {
    fn default() -> Self {
        FormingProbe::BackwardScan { window: 2, depth: 7 }
    }
}

/// Moving average flavour for MA-distance scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MovingAverageKind {
    #[default]
    Ema,
    Sma,
}

/// Raw score used by the trend strength indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrendMethod {
    #[default]
    PriceChange,
    EmaSlope,
    MaDistance,
}

/// Plot style for the smoothed Hurst exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HurstDisplay {
    Line,
    #[default]
    Histogram,
}

// ============================================================================
// Moving Averages
// ============================================================================

/// Simple Moving Average configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SMAConfig {
    pub period: usize,
}

impl SMAConfig {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Default for SMAConfig {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// Exponential Moving Average configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EMAConfig {
    pub period: usize,
}

impl EMAConfig {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Smoothing factor `2 / (period + 1)`.
    pub fn smoothing_factor(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }
}

impl Default for EMAConfig {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// Two-pole Butterworth smoother configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ButterworthConfig {
    /// Cutoff period in bars; fractional values are allowed.
    pub period: f64,
}

impl ButterworthConfig {
    pub fn new(period: f64) -> Self {
        Self { period }
    }
}

impl Default for ButterworthConfig {
    fn default() -> Self {
        Self { period: 10.0 }
    }
}

// ============================================================================
// Oscillators
// ============================================================================

/// Relative Strength Index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RSIConfig {
    pub period: usize,
    pub source: PriceSource,
    /// Overbought guide (default: 70).
    pub overbought: f64,
    /// Oversold guide (default: 30).
    pub oversold: f64,
}

impl RSIConfig {
    pub fn new(period: usize) -> Self {
        Self { period, ..Self::default() }
    }

    pub fn with_source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_at_least("rsi.period", self.period, 1)?;
        if !(0.0..=100.0).contains(&self.oversold)
            || !(0.0..=100.0).contains(&self.overbought)
            || self.oversold >= self.overbought
        {
            return Err(IndicatorError::invalid(
                "rsi.oversold",
                "guides must satisfy 0 <= oversold < overbought <= 100",
            ));
        }
        Ok(())
    }
}

impl Default for RSIConfig {
    fn default() -> Self {
        Self {
            period: 14,
            source: PriceSource::Close,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

// ============================================================================
// Volatility
// ============================================================================

/// Average True Range configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ATRConfig {
    pub period: usize,
}

impl ATRConfig {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Default for ATRConfig {
    fn default() -> Self {
        Self { period: 14 }
    }
}

// ============================================================================
// Pivots & Divergences
// ============================================================================

/// Pivot window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PivotConfig {
    /// Bars to the left of the candidate.
    pub left: usize,
    /// Bars to the right; also the confirmation delay.
    pub right: usize,
}

impl PivotConfig {
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    pub fn validate(&self) -> Result<()> {
        require_at_least("pivot.left", self.left, 1)?;
        require_at_least("pivot.right", self.right, 1)
    }
}

impl Default for PivotConfig {
    fn default() -> Self {
        Self { left: 7, right: 7 }
    }
}

/// Divergence engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DivergenceConfig {
    /// Minimum bars between paired pivots.
    pub range_lower: usize,
    /// Maximum bars between paired pivots.
    pub range_upper: usize,
    pub signal_mode: SignalMode,
    pub show_lines: bool,
    pub show_markers: bool,
    pub show_forming: bool,
    pub forming_probe: FormingProbe,
}

impl DivergenceConfig {
    pub fn with_range(mut self, lower: usize, upper: usize) -> Self {
        self.range_lower = lower;
        self.range_upper = upper;
        self
    }

    pub fn with_signal_mode(mut self, mode: SignalMode) -> Self {
        self.signal_mode = mode;
        self
    }

    pub fn with_forming_probe(mut self, probe: FormingProbe) -> Self {
        self.forming_probe = probe;
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_at_least("divergence.range_lower", self.range_lower, 1)?;
        require_at_least("divergence.range_upper", self.range_upper, 2)?;
        if self.range_lower > self.range_upper {
            return Err(IndicatorError::invalid(
                "divergence.range_lower",
                "must not exceed range_upper",
            ));
        }
        self.forming_probe.validate()
    }
}

impl Default for DivergenceConfig {
    fn default() -> Self {
        Self {
            range_lower: 5,
            range_upper: 60,
            signal_mode: SignalMode::RegularOnly,
            show_lines: true,
            show_markers: true,
            show_forming: true,
            forming_probe: FormingProbe::default(),
        }
    }
}

/// RSI divergence indicator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RSIDivergenceConfig {
    pub rsi: RSIConfig,
    pub pivot: PivotConfig,
    pub divergence: DivergenceConfig,
    /// Divergence line thickness, 1..=4.
    pub line_width: LineWidth,
}

impl RSIDivergenceConfig {
    pub fn validate(&self) -> Result<()> {
        self.rsi.validate()?;
        self.pivot.validate()?;
        self.divergence.validate()?;
        self.line_width.validate()
    }
}

/// Plot thickness, 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineWidth(pub u8);

impl LineWidth {
    pub fn validate(&self) -> Result<()> {
        if !(1..=4).contains(&self.0) {
            return Err(IndicatorError::invalid("line_width", "must be within 1..=4"));
        }
        Ok(())
    }
}

impl Default for LineWidth {
    fn default() -> Self {
        LineWidth(2)
    }
}

// ============================================================================
// Statistical
// ============================================================================

/// Windowed Hurst exponent configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HurstConfig {
    /// Lookback window N (>= 2).
    pub lookback: usize,
    /// Butterworth period applied to the raw exponent.
    pub smoothing_period: f64,
    pub show_raw: bool,
    pub display: HurstDisplay,
    pub line_width: LineWidth,
    /// Below this the regime is strongly mean-reverting.
    pub lower_threshold: f64,
    /// Above this the regime is strongly trending.
    pub upper_threshold: f64,
}

impl HurstConfig {
    pub fn new(lookback: usize) -> Self {
        Self { lookback, ..Self::default() }
    }

    pub fn with_thresholds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_threshold = lower;
        self.upper_threshold = upper;
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_at_least("hurst.lookback", self.lookback, 2)?;
        if !(self.smoothing_period >= 2.0) {
            return Err(IndicatorError::invalid(
                "hurst.smoothing_period",
                "must be at least 2",
            ));
        }
        if !(self.lower_threshold > 0.0) {
            return Err(IndicatorError::invalid("hurst.lower_threshold", "must be positive"));
        }
        if !(self.lower_threshold < self.upper_threshold) {
            return Err(IndicatorError::invalid(
                "hurst.lower_threshold",
                "must be below upper_threshold",
            ));
        }
        self.line_width.validate()
    }
}

impl Default for HurstConfig {
    fn default() -> Self {
        Self {
            lookback: 60,
            smoothing_period: 10.0,
            show_raw: false,
            display: HurstDisplay::Histogram,
            line_width: LineWidth::default(),
            lower_threshold: 0.40,
            upper_threshold: 0.60,
        }
    }
}

/// Returns distribution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnsDistributionConfig {
    /// Historical returns to use; 0 means all of them.
    pub lookback: usize,
    /// Histogram buckets; 0 picks `max(10, ceil(sqrt(n)))`.
    pub bins: usize,
}

impl ReturnsDistributionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bins != 0 && !(10..=50).contains(&self.bins) {
            return Err(IndicatorError::invalid("returns.bins", "must be 0 or within 10..=50"));
        }
        Ok(())
    }
}

impl Default for ReturnsDistributionConfig {
    fn default() -> Self {
        Self { lookback: 0, bins: 30 }
    }
}

// ============================================================================
// Trend
// ============================================================================

/// Trend strength score configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendStrengthConfig {
    pub method: TrendMethod,
    /// Price change lookback.
    pub pc_lookback: usize,
    /// EMA length for the slope method.
    pub ema_len: usize,
    /// SMA applied to the EMA slope.
    pub ema_slope_smooth: usize,
    pub ma1_kind: MovingAverageKind,
    pub ma1_len: usize,
    pub ma2_kind: MovingAverageKind,
    pub ma2_len: usize,
    pub atr_len: usize,
    /// Rolling window used to rescale the raw score to [-100, 100].
    pub norm_len: usize,
}

impl TrendStrengthConfig {
    pub fn with_method(mut self, method: TrendMethod) -> Self {
        self.method = method;
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_at_least("trend.pc_lookback", self.pc_lookback, 1)?;
        require_at_least("trend.ema_len", self.ema_len, 2)?;
        require_at_least("trend.ema_slope_smooth", self.ema_slope_smooth, 1)?;
        require_at_least("trend.ma1_len", self.ma1_len, 1)?;
        require_at_least("trend.ma2_len", self.ma2_len, 1)?;
        require_at_least("trend.atr_len", self.atr_len, 1)?;
        require_at_least("trend.norm_len", self.norm_len, 10)
    }
}

impl Default for TrendStrengthConfig {
    fn default() -> Self {
        Self {
            method: TrendMethod::PriceChange,
            pc_lookback: 20,
            ema_len: 21,
            ema_slope_smooth: 5,
            ma1_kind: MovingAverageKind::Ema,
            ma1_len: 20,
            ma2_kind: MovingAverageKind::Sma,
            ma2_len: 50,
            atr_len: 14,
            norm_len: 100,
        }
    }
}
