//! Oscillator/price divergence engine.
//!
//! Pairs consecutive confirmed pivots of the same polarity in an oscillator
//! series and compares them with the co-occurring price extremes:
//!
//! | pair of    | price       | oscillator  | class           |
//! |------------|-------------|-------------|-----------------|
//! | pivot lows | lower low   | higher low  | regular bullish |
//! | pivot lows | higher low  | lower low   | hidden bullish  |
//! | pivot highs| higher high | lower high  | regular bearish |
//! | pivot highs| lower high  | higher high | hidden bearish  |
//!
//! Only the most recent low and high pivot are remembered. After the
//! confirmed scan a forming-pivot probe looks at the newest bars and may
//! report a provisional divergence against the remembered pivot.

use std::ops::RangeInclusive;

use indicator_api::{DivergenceConfig, FormingProbe, PivotConfig, SignalMode};
use indicator_spi::{IndicatorError, IndicatorSignal, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::pivot::{is_pivot_high, is_pivot_low, PivotDetector, PivotType};
use crate::segment::{draw_segment, draw_segment_dotted};

// ============================================================================
// Pivot Records and Classification
// ============================================================================

/// A pivot in the oscillator with the matching price extreme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pivot {
    pub index: usize,
    /// Oscillator value at `index`.
    pub value: f64,
    /// `low[index]` for pivot lows, `high[index]` for pivot highs.
    pub price: f64,
}

impl Pivot {
    pub fn new(index: usize, value: f64, price: f64) -> Self {
        Self { index, value, price }
    }
}

/// Divergence class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceKind {
    RegularBullish,
    RegularBearish,
    HiddenBullish,
    HiddenBearish,
    FormingBullish,
    FormingBearish,
}

impl DivergenceKind {
    pub fn signal(&self) -> IndicatorSignal {
        match self {
            DivergenceKind::RegularBullish
            | DivergenceKind::HiddenBullish
            | DivergenceKind::FormingBullish => IndicatorSignal::Bullish,
            DivergenceKind::RegularBearish
            | DivergenceKind::HiddenBearish
            | DivergenceKind::FormingBearish => IndicatorSignal::Bearish,
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, DivergenceKind::HiddenBullish | DivergenceKind::HiddenBearish)
    }

    pub fn is_forming(&self) -> bool {
        matches!(self, DivergenceKind::FormingBullish | DivergenceKind::FormingBearish)
    }

    /// The provisional counterpart of a confirmed class.
    pub fn forming(&self) -> DivergenceKind {
        match self.signal() {
            IndicatorSignal::Bearish => DivergenceKind::FormingBearish,
            _ => DivergenceKind::FormingBullish,
        }
    }

    /// Whether `mode` reports this class. Forming classes follow whichever
    /// confirmed class produced them, so they are checked before conversion.
    pub fn is_wanted(&self, mode: SignalMode) -> bool {
        if self.is_forming() {
            mode.wants_regular() || mode.wants_hidden()
        } else if self.is_hidden() {
            mode.wants_hidden()
        } else {
            mode.wants_regular()
        }
    }
}

type Classifier = fn(&Pivot, &Pivot) -> Option<DivergenceKind>;

/// Classify a pair of pivot lows.
pub fn classify_lows(prev: &Pivot, cur: &Pivot) -> Option<DivergenceKind> {
    if cur.price < prev.price && cur.value > prev.value {
        Some(DivergenceKind::RegularBullish)
    } else if cur.price > prev.price && cur.value < prev.value {
        Some(DivergenceKind::HiddenBullish)
    } else {
        None
    }
}

/// Classify a pair of pivot highs.
pub fn classify_highs(prev: &Pivot, cur: &Pivot) -> Option<DivergenceKind> {
    if cur.price > prev.price && cur.value < prev.value {
        Some(DivergenceKind::RegularBearish)
    } else if cur.price < prev.price && cur.value > prev.value {
        Some(DivergenceKind::HiddenBearish)
    } else {
        None
    }
}

// ============================================================================
// State
// ============================================================================

/// Last confirmed pivot of each polarity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DivergenceState {
    pub last_low: Option<Pivot>,
    pub last_high: Option<Pivot>,
}

impl DivergenceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a confirmed pivot low.
    ///
    /// The stored low is always replaced. Returns the previous low and the
    /// divergence class when the pair is `range` bars apart and diverges.
    pub fn confirm_low(
        &mut self,
        pivot: Pivot,
        range: &RangeInclusive<usize>,
    ) -> Option<(Pivot, DivergenceKind)> {
        let prev = self.last_low.replace(pivot)?;
        Self::pair(prev, pivot, range, classify_lows)
    }

    /// Record a confirmed pivot high.
    pub fn confirm_high(
        &mut self,
        pivot: Pivot,
        range: &RangeInclusive<usize>,
    ) -> Option<(Pivot, DivergenceKind)> {
        let prev = self.last_high.replace(pivot)?;
        Self::pair(prev, pivot, range, classify_highs)
    }

    fn pair<F>(
        prev: Pivot,
        cur: Pivot,
        range: &RangeInclusive<usize>,
        classify: F,
    ) -> Option<(Pivot, DivergenceKind)>
    where
        F: Fn(&Pivot, &Pivot) -> Option<DivergenceKind>,
    {
        let bars = cur.index.checked_sub(prev.index)?;
        if !range.contains(&bars) {
            return None;
        }
        classify(&prev, &cur).map(|kind| (prev, kind))
    }
}

// ============================================================================
// Output
// ============================================================================

/// One reported divergence, from the stored pivot to the newer one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DivergenceEvent {
    pub kind: DivergenceKind,
    pub from: Pivot,
    pub to: Pivot,
}

/// Line series, one per divergence class.
#[derive(Debug, Clone)]
pub struct DivergenceLines {
    pub regular_bullish: Vec<f64>,
    pub regular_bearish: Vec<f64>,
    pub hidden_bullish: Vec<f64>,
    pub hidden_bearish: Vec<f64>,
    pub forming_bullish: Vec<f64>,
    pub forming_bearish: Vec<f64>,
}

impl DivergenceLines {
    fn new(len: usize) -> Self {
        Self {
            regular_bullish: vec![f64::NAN; len],
            regular_bearish: vec![f64::NAN; len],
            hidden_bullish: vec![f64::NAN; len],
            hidden_bearish: vec![f64::NAN; len],
            forming_bullish: vec![f64::NAN; len],
            forming_bearish: vec![f64::NAN; len],
        }
    }

    pub fn get(&self, kind: DivergenceKind) -> &[f64] {
        match kind {
            DivergenceKind::RegularBullish => &self.regular_bullish,
            DivergenceKind::RegularBearish => &self.regular_bearish,
            DivergenceKind::HiddenBullish => &self.hidden_bullish,
            DivergenceKind::HiddenBearish => &self.hidden_bearish,
            DivergenceKind::FormingBullish => &self.forming_bullish,
            DivergenceKind::FormingBearish => &self.forming_bearish,
        }
    }

    fn get_mut(&mut self, kind: DivergenceKind) -> &mut [f64] {
        match kind {
            DivergenceKind::RegularBullish => &mut self.regular_bullish,
            DivergenceKind::RegularBearish => &mut self.regular_bearish,
            DivergenceKind::HiddenBullish => &mut self.hidden_bullish,
            DivergenceKind::HiddenBearish => &mut self.hidden_bearish,
            DivergenceKind::FormingBullish => &mut self.forming_bullish,
            DivergenceKind::FormingBearish => &mut self.forming_bearish,
        }
    }
}

/// Marker series for confirmed classes, holding the oscillator value at the
/// newer pivot.
#[derive(Debug, Clone)]
pub struct DivergenceMarkers {
    pub regular_bullish: Vec<f64>,
    pub regular_bearish: Vec<f64>,
    pub hidden_bullish: Vec<f64>,
    pub hidden_bearish: Vec<f64>,
}

impl DivergenceMarkers {
    fn new(len: usize) -> Self {
        Self {
            regular_bullish: vec![f64::NAN; len],
            regular_bearish: vec![f64::NAN; len],
            hidden_bullish: vec![f64::NAN; len],
            hidden_bearish: vec![f64::NAN; len],
        }
    }

    /// Markers for `kind`; forming classes have none.
    pub fn get(&self, kind: DivergenceKind) -> Option<&[f64]> {
        match kind {
            DivergenceKind::RegularBullish => Some(&self.regular_bullish),
            DivergenceKind::RegularBearish => Some(&self.regular_bearish),
            DivergenceKind::HiddenBullish => Some(&self.hidden_bullish),
            DivergenceKind::HiddenBearish => Some(&self.hidden_bearish),
            _ => None,
        }
    }

    fn get_mut(&mut self, kind: DivergenceKind) -> Option<&mut Vec<f64>> {
        match kind {
            DivergenceKind::RegularBullish => Some(&mut self.regular_bullish),
            DivergenceKind::RegularBearish => Some(&mut self.regular_bearish),
            DivergenceKind::HiddenBullish => Some(&mut self.hidden_bullish),
            DivergenceKind::HiddenBearish => Some(&mut self.hidden_bearish),
            _ => None,
        }
    }
}

/// Result of one full divergence pass.
#[derive(Debug, Clone)]
pub struct DivergenceOutput {
    pub lines: DivergenceLines,
    pub markers: DivergenceMarkers,
    /// Reported divergences in confirmation order, forming ones last.
    pub events: Vec<DivergenceEvent>,
    /// State after the confirmed scan. Forming probes never change it.
    pub state: DivergenceState,
}

impl DivergenceOutput {
    pub fn events_of(&self, kind: DivergenceKind) -> impl Iterator<Item = &DivergenceEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Divergence engine over an oscillator and its price extremes.
#[derive(Debug, Clone)]
pub struct DivergenceEngine {
    pivots: PivotDetector,
    config: DivergenceConfig,
}

impl DivergenceEngine {
    pub fn new(pivots: PivotDetector, config: DivergenceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { pivots, config })
    }

    pub fn from_config(pivot: PivotConfig, divergence: DivergenceConfig) -> Result<Self> {
        pivot.validate()?;
        Self::new(PivotDetector::from_config(pivot), divergence)
    }

    pub fn pivots(&self) -> &PivotDetector {
        &self.pivots
    }

    pub fn config(&self) -> &DivergenceConfig {
        &self.config
    }

    /// Run a full pass from bar 0.
    pub fn run(&self, osc: &[f64], high: &[f64], low: &[f64]) -> Result<DivergenceOutput> {
        let n = osc.len();
        for (field, len) in [("high", high.len()), ("low", low.len())] {
            if len != n {
                return Err(IndicatorError::LengthMismatch { field, expected: n, got: len });
            }
        }

        let range = self.config.range_lower..=self.config.range_upper;
        let mut out = DivergenceOutput {
            lines: DivergenceLines::new(n),
            markers: DivergenceMarkers::new(n),
            events: Vec::new(),
            state: DivergenceState::new(),
        };

        let confirmations = self.pivots.confirmations(osc);
        for &(p, kind) in &confirmations {
            let paired = match kind {
                PivotType::Low => {
                    let pivot = Pivot::new(p, osc[p], low[p]);
                    trace!(index = p, value = pivot.value, price = pivot.price, "pivot low");
                    out.state.confirm_low(pivot, &range).map(|(prev, k)| (prev, pivot, k))
                }
                PivotType::High => {
                    let pivot = Pivot::new(p, osc[p], high[p]);
                    trace!(index = p, value = pivot.value, price = pivot.price, "pivot high");
                    out.state.confirm_high(pivot, &range).map(|(prev, k)| (prev, pivot, k))
                }
            };
            if let Some((from, to, kind)) = paired {
                self.emit(&mut out, kind, from, to);
            }
        }

        if self.config.show_forming {
            self.probe_forming(&mut out, osc, high, low);
        }

        debug!(
            bars = n,
            pivots = confirmations.len(),
            events = out.events.len(),
            "divergence pass"
        );

        Ok(out)
    }

    fn emit(&self, out: &mut DivergenceOutput, kind: DivergenceKind, from: Pivot, to: Pivot) {
        if !kind.is_wanted(self.config.signal_mode) {
            trace!(?kind, from = from.index, to = to.index, "divergence filtered by signal mode");
            return;
        }
        trace!(?kind, from = from.index, to = to.index, "divergence");

        out.events.push(DivergenceEvent { kind, from, to });
        if self.config.show_lines {
            draw_segment(out.lines.get_mut(kind), from.index, to.index, from.value, to.value);
        }
        if self.config.show_markers {
            if let Some(markers) = out.markers.get_mut(kind) {
                markers[to.index] = to.value;
            }
        }
    }

    fn probe_forming(&self, out: &mut DivergenceOutput, osc: &[f64], high: &[f64], low: &[f64]) {
        let mode = self.config.signal_mode;
        let state = out.state;

        let sides: [(Option<Pivot>, PivotType, &[f64], Classifier); 2] = [
            (state.last_low, PivotType::Low, low, classify_lows),
            (state.last_high, PivotType::High, high, classify_highs),
        ];

        for (stored, side, price, classify) in sides {
            let Some(stored) = stored else { continue };
            let Some(c) = self.forming_candidate(osc, side, stored.index) else {
                continue;
            };
            let candidate = Pivot::new(c, osc[c], price[c]);

            let wanted = classify(&stored, &candidate).filter(|k| k.is_wanted(mode));
            if let Some(confirmed_kind) = wanted {
                let kind = confirmed_kind.forming();
                trace!(?kind, from = stored.index, to = c, "forming divergence");
                draw_segment_dotted(
                    out.lines.get_mut(kind),
                    stored.index,
                    c,
                    stored.value,
                    candidate.value,
                );
                out.events.push(DivergenceEvent { kind, from: stored, to: candidate });
            }
        }
    }

    /// Locate the provisional pivot for `side`, strictly after index `after`.
    pub fn forming_candidate(&self, osc: &[f64], side: PivotType, after: usize) -> Option<usize> {
        let n = osc.len();
        match self.config.forming_probe {
            FormingProbe::FixedOffset { offset } => {
                let c = n.checked_sub(offset + 1)?;
                (c > after && !osc[c].is_nan()).then_some(c)
            }
            FormingProbe::BackwardScan { window, depth } => {
                let mut c = n.checked_sub(window + 1)?;
                for _ in 0..depth {
                    if c <= after {
                        return None;
                    }
                    let hit = match side {
                        PivotType::Low => is_pivot_low(osc, c, window, window),
                        PivotType::High => is_pivot_high(osc, c, window, window),
                    };
                    if hit {
                        return Some(c);
                    }
                    c = c.checked_sub(1)?;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(config: DivergenceConfig) -> DivergenceEngine {
        DivergenceEngine::new(PivotDetector::symmetric(1), config).unwrap()
    }

    fn wide_range() -> DivergenceConfig {
        DivergenceConfig::default()
            .with_range(1, 60)
            .with_forming_probe(FormingProbe::FixedOffset { offset: 0 })
    }

    #[test]
    fn test_regular_bullish() {
        // Pivot lows at 1 (3.0) and 5 (4.0); price 10 -> 9.
        let osc = [5.0, 3.0, 6.0, 7.0, 6.0, 4.0, 6.0];
        let low = [11.0, 10.0, 11.0, 12.0, 11.0, 9.0, 11.0];
        let high = [20.0; 7];

        let out = engine(wide_range()).run(&osc, &high, &low).unwrap();

        assert_eq!(out.events.len(), 1);
        let event = out.events[0];
        assert_eq!(event.kind, DivergenceKind::RegularBullish);
        assert_eq!((event.from.index, event.to.index), (1, 5));
        assert_eq!(&out.lines.regular_bullish[1..=5], &[3.0, 3.25, 3.5, 3.75, 4.0]);
        assert_eq!(out.markers.regular_bullish[5], 4.0);
        assert!(out.markers.regular_bullish[1].is_nan());
    }

    #[test]
    fn test_hidden_bullish_needs_mode() {
        let osc = [5.0, 4.0, 6.0, 7.0, 6.0, 3.0, 6.0];
        let low = [11.0, 9.0, 11.0, 12.0, 11.0, 10.0, 11.0];
        let high = [20.0; 7];

        let regular_only = engine(wide_range()).run(&osc, &high, &low).unwrap();
        assert!(regular_only.events.is_empty());
        assert!(regular_only.lines.hidden_bullish.iter().all(|v| v.is_nan()));

        let all = engine(wide_range().with_signal_mode(SignalMode::All))
            .run(&osc, &high, &low)
            .unwrap();
        assert_eq!(all.events.len(), 1);
        assert_eq!(all.events[0].kind, DivergenceKind::HiddenBullish);
        assert_eq!(all.markers.hidden_bullish[5], 3.0);
    }

    #[test]
    fn test_regular_bearish() {
        let osc = [5.0, 7.0, 4.0, 3.0, 4.0, 6.0, 4.0];
        let high = [9.0, 10.0, 9.0, 8.0, 9.0, 11.0, 9.0];
        let low = [1.0; 7];

        let out = engine(wide_range()).run(&osc, &high, &low).unwrap();

        let bearish: Vec<_> = out.events_of(DivergenceKind::RegularBearish).collect();
        assert_eq!(bearish.len(), 1);
        assert_eq!(bearish[0].from.price, 10.0);
        assert_eq!(bearish[0].to.price, 11.0);
        assert_eq!(out.markers.regular_bearish[5], 6.0);
    }

    #[test]
    fn test_range_gates_pairing_but_state_advances() {
        let osc = [5.0, 3.0, 6.0, 7.0, 6.0, 4.0, 6.0];
        let low = [11.0, 10.0, 11.0, 12.0, 11.0, 9.0, 11.0];
        let high = [20.0; 7];

        let config = DivergenceConfig::default()
            .with_range(5, 60)
            .with_forming_probe(FormingProbe::FixedOffset { offset: 0 });
        let out = engine(config).run(&osc, &high, &low).unwrap();

        assert!(out.events.is_empty());
        assert_eq!(out.state.last_low.map(|p| p.index), Some(5));
        assert_eq!(out.state.last_high.map(|p| p.index), Some(3));
    }

    #[test]
    fn test_display_toggles() {
        let osc = [5.0, 3.0, 6.0, 7.0, 6.0, 4.0, 6.0];
        let low = [11.0, 10.0, 11.0, 12.0, 11.0, 9.0, 11.0];
        let high = [20.0; 7];

        let mut config = wide_range();
        config.show_lines = false;
        config.show_markers = false;
        let out = engine(config).run(&osc, &high, &low).unwrap();

        assert_eq!(out.events.len(), 1);
        assert!(out.lines.regular_bullish.iter().all(|v| v.is_nan()));
        assert!(out.markers.regular_bullish.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_forming_fixed_offset_does_not_touch_state() {
        // Same confirmed lows as above plus a newest bar that undercuts price
        // while the oscillator holds above the last pivot.
        let osc = [5.0, 3.0, 6.0, 7.0, 6.0, 4.0, 6.0, 5.0];
        let low = [11.0, 10.0, 11.0, 12.0, 11.0, 9.0, 11.0, 8.0];
        let high = [20.0; 8];

        let with = engine(wide_range()).run(&osc, &high, &low).unwrap();
        let mut quiet = wide_range();
        quiet.show_forming = false;
        let without = engine(quiet).run(&osc, &high, &low).unwrap();

        assert_eq!(with.state, without.state);
        assert_eq!(with.state.last_low.map(|p| p.index), Some(5));

        let forming: Vec<_> = with.events_of(DivergenceKind::FormingBullish).collect();
        assert_eq!(forming.len(), 1);
        assert_eq!(forming[0].to.index, 7);
        assert_eq!(with.lines.forming_bullish[5], 4.0);
        assert_eq!(with.lines.forming_bullish[6], 4.5);
        // (7 - 5) % 4 == 2 falls in the gap of the dash.
        assert!(with.lines.forming_bullish[7].is_nan());
        assert!(without.lines.forming_bullish.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_forming_disabled_without_signal_classes() {
        let osc = [5.0, 3.0, 6.0, 7.0, 6.0, 4.0, 6.0, 5.0];
        let low = [11.0, 10.0, 11.0, 12.0, 11.0, 9.0, 11.0, 8.0];
        let high = [20.0; 8];

        let out = engine(wide_range().with_signal_mode(SignalMode::None))
            .run(&osc, &high, &low)
            .unwrap();
        assert!(out.events.is_empty());
        assert!(out.lines.forming_bullish.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_backward_scan_candidate() {
        // Window 1: bar 6 is a (1, 1) low, bar 7 is the newest.
        let osc = [5.0, 3.0, 6.0, 7.0, 6.0, 4.0, 6.0, 4.5, 6.0];
        let config = DivergenceConfig::default()
            .with_forming_probe(FormingProbe::BackwardScan { window: 1, depth: 3 });
        let e = engine(config);

        assert_eq!(e.forming_candidate(&osc, PivotType::Low, 5), Some(7));
        assert_eq!(e.forming_candidate(&osc, PivotType::High, 3), Some(6));
        // Never reaches back to the stored pivot.
        assert_eq!(e.forming_candidate(&osc, PivotType::Low, 7), None);
    }

    #[test]
    fn test_default_probe_draws_forming_line() {
        // Confirmed low at 3; bar 9 is a (2, 2) low that a (3, 3) detector
        // cannot confirm yet. Price undercuts while the oscillator holds.
        let osc = [6.0, 5.0, 4.0, 3.0, 4.0, 5.0, 6.0, 7.0, 6.0, 4.0, 5.0, 6.0];
        let low = [11.0, 11.0, 11.0, 10.0, 11.0, 11.0, 11.0, 11.0, 11.0, 9.0, 11.0, 11.0];
        let high = [20.0; 12];
        let config = DivergenceConfig::default().with_range(1, 60);
        assert_eq!(config.forming_probe, FormingProbe::BackwardScan { window: 2, depth: 7 });

        let e = DivergenceEngine::new(PivotDetector::symmetric(3), config).unwrap();
        let out = e.run(&osc, &high, &low).unwrap();

        let forming: Vec<_> = out.events_of(DivergenceKind::FormingBullish).collect();
        assert_eq!(forming.len(), 1);
        assert_eq!((forming[0].from.index, forming[0].to.index), (3, 9));
        assert_eq!(forming[0].to.price, 9.0);
        assert_eq!(out.events.len(), 1);

        // Dotted: two on, two off from the stored pivot.
        let line = &out.lines.forming_bullish;
        assert_eq!(line[3], 3.0);
        assert!(!line[4].is_nan());
        assert!(line[5].is_nan() && line[6].is_nan());
        assert!(!line[7].is_nan() && !line[8].is_nan());
        assert!(line[9].is_nan());
        assert!(line[10].is_nan());

        // The probe leaves the stored pivot untouched.
        assert_eq!(out.state.last_low.map(|p| p.index), Some(3));
        assert!(out.lines.forming_bearish.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_backward_scan_depth_limit() {
        let osc = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let config = DivergenceConfig::default()
            .with_forming_probe(FormingProbe::BackwardScan { window: 1, depth: 7 });
        let e = engine(config);
        // Monotone: no interior extremum anywhere.
        assert_eq!(e.forming_candidate(&osc, PivotType::Low, 0), None);
        assert_eq!(e.forming_candidate(&osc, PivotType::High, 0), None);
    }

    #[test]
    fn test_fixed_offset_requires_present_value() {
        let osc = [1.0, 2.0, f64::NAN];
        let config = DivergenceConfig::default()
            .with_forming_probe(FormingProbe::FixedOffset { offset: 0 });
        let e = engine(config);
        assert_eq!(e.forming_candidate(&osc, PivotType::Low, 0), None);

        let config = DivergenceConfig::default()
            .with_forming_probe(FormingProbe::FixedOffset { offset: 1 });
        let e = engine(config);
        assert_eq!(e.forming_candidate(&osc, PivotType::Low, 0), Some(1));
        assert_eq!(e.forming_candidate(&osc, PivotType::Low, 1), None);
    }

    #[test]
    fn test_regular_and_hidden_never_both_fire() {
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            (seed % 1000) as f64 / 10.0
        };
        let n = 400;
        let osc: Vec<f64> = (0..n).map(|_| next()).collect();
        let low: Vec<f64> = (0..n).map(|_| next()).collect();
        let high: Vec<f64> = low.iter().map(|l| l + 5.0).collect();

        let config = DivergenceConfig::default()
            .with_range(1, 400)
            .with_signal_mode(SignalMode::All);
        let out = engine(config).run(&osc, &high, &low).unwrap();
        assert!(!out.events.is_empty());

        for bullish in [true, false] {
            for i in 0..n {
                let (regular, hidden) = if bullish {
                    (&out.markers.regular_bullish, &out.markers.hidden_bullish)
                } else {
                    (&out.markers.regular_bearish, &out.markers.hidden_bearish)
                };
                assert!(regular[i].is_nan() || hidden[i].is_nan(), "both fired at {}", i);
            }
        }
    }

    #[test]
    fn test_classification_is_strict() {
        let a = Pivot::new(0, 30.0, 10.0);
        let same_price = Pivot::new(5, 35.0, 10.0);
        assert_eq!(classify_lows(&a, &same_price), None);
        assert_eq!(classify_highs(&a, &same_price), None);

        let b = Pivot::new(5, 35.0, 9.0);
        assert_eq!(classify_lows(&a, &b), Some(DivergenceKind::RegularBullish));
        assert_eq!(classify_highs(&a, &b), Some(DivergenceKind::HiddenBearish));
    }

    #[test]
    fn test_mismatched_lengths() {
        let err = engine(DivergenceConfig::default())
            .run(&[1.0, 2.0], &[1.0, 2.0], &[1.0])
            .unwrap_err();
        assert_eq!(err, IndicatorError::LengthMismatch { field: "low", expected: 2, got: 1 });
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DivergenceConfig::default().with_range(10, 5);
        assert!(DivergenceEngine::new(PivotDetector::symmetric(1), config).is_err());
        assert!(DivergenceEngine::from_config(PivotConfig::new(0, 3), DivergenceConfig::default())
            .is_err());
    }

    #[test]
    fn test_kind_helpers() {
        assert_eq!(DivergenceKind::HiddenBearish.signal(), IndicatorSignal::Bearish);
        assert_eq!(DivergenceKind::HiddenBearish.forming(), DivergenceKind::FormingBearish);
        assert!(DivergenceKind::HiddenBullish.is_wanted(SignalMode::HiddenOnly));
        assert!(!DivergenceKind::RegularBullish.is_wanted(SignalMode::HiddenOnly));
        assert!(DivergenceKind::FormingBearish.is_wanted(SignalMode::RegularOnly));
        assert!(!DivergenceKind::FormingBearish.is_wanted(SignalMode::None));
    }
}
