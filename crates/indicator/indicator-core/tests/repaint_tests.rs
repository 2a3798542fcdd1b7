//! Repainting Behavior Tests
//!
//! These tests verify that:
//! - Appending bars never changes values already produced
//! - Recomputing over the same bars is idempotent
//! - Absent inputs stay local instead of poisoning later output

use indicator_core::*;

// ============================================================================
// Test Helpers
// ============================================================================

/// Verifies an indicator does NOT repaint by checking historical values remain stable
/// when new data is appended.
fn assert_no_repaint<F>(name: &str, calc: F, initial_data: &[f64], check_indices: &[usize])
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let result1 = calc(initial_data);

    let historical: Vec<(usize, f64)> = check_indices
        .iter()
        .filter(|&&i| i < result1.len() && !result1[i].is_nan())
        .map(|&i| (i, result1[i]))
        .collect();
    assert!(!historical.is_empty(), "{} produced no values to check", name);

    let last = *initial_data.last().unwrap_or(&100.0);
    let mut extended = initial_data.to_vec();
    extended.extend_from_slice(&[last * 1.02, last * 0.98, last * 1.01, last * 1.03, last * 0.99]);

    let result2 = calc(&extended);

    for (idx, expected) in historical {
        let actual = result2[idx];
        assert!(
            (actual - expected).abs() < 1e-10,
            "{} repainted at index {}: was {}, now {}",
            name,
            idx,
            expected,
            actual
        );
    }
}

/// Same series, same output, NaN positions included.
fn assert_idempotent<F>(name: &str, calc: F, data: &[f64])
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let a = calc(data);
    let b = calc(data);
    assert_eq!(a.len(), data.len(), "{} output misaligned", name);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert!(
            (x.is_nan() && y.is_nan()) || x == y,
            "{} not idempotent at {}: {} vs {}",
            name,
            i,
            x,
            y
        );
    }
}

// ============================================================================
// Sample Data
// ============================================================================

fn sample_prices() -> Vec<f64> {
    vec![
        100.0, 101.5, 99.8, 102.3, 101.0, 103.5, 102.8, 104.2, 103.0, 105.5, 104.5, 106.0, 105.2,
        107.3, 106.1, 108.0, 107.5, 109.2, 108.3, 110.0,
    ]
}

fn sample_hlc() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let close = sample_prices();
    let high: Vec<f64> = close.iter().map(|c| c * 1.01).collect();
    let low: Vec<f64> = close.iter().map(|c| c * 0.99).collect();
    (high, low, close)
}

// ============================================================================
// Non-Repainting Tests
// ============================================================================

#[test]
fn test_sma_no_repaint() {
    let data = sample_prices();
    let sma = SMA::new(5);
    assert_no_repaint("SMA", |d| sma.calculate(d), &data, &[5, 8, 10, 15]);
}

#[test]
fn test_ema_no_repaint() {
    let data = sample_prices();
    let ema = EMA::new(5);
    assert_no_repaint("EMA", |d| ema.calculate(d), &data, &[5, 8, 10, 15]);
}

#[test]
fn test_butterworth_no_repaint() {
    let data = sample_prices();
    let filter = Butterworth::new(6.0).unwrap();
    assert_no_repaint("Butterworth", |d| filter.calculate(d), &data, &[2, 8, 12, 19]);
}

#[test]
fn test_rsi_no_repaint() {
    let data = sample_prices();
    let rsi = RSI::new(5);
    assert_no_repaint("RSI", |d| rsi.calculate(d), &data, &[5, 10, 15, 19]);
}

#[test]
fn test_atr_no_repaint() {
    let (high, low, close) = sample_hlc();
    let atr = ATR::new(5);
    // Scale high/low from whatever close is passed in.
    assert_no_repaint(
        "ATR",
        |c| {
            let h: Vec<f64> = c.iter().map(|v| v * 1.01).collect();
            let l: Vec<f64> = c.iter().map(|v| v * 0.99).collect();
            atr.calculate(&h, &l, c)
        },
        &close,
        &[3, 8, 12, 19],
    );
    assert_eq!(atr.calculate(&high, &low, &close).len(), close.len());
}

#[test]
fn test_rolling_extrema_no_repaint() {
    let data = sample_prices();
    assert_no_repaint("rolling_min", |d| series::rolling_min(d, 4), &data, &[3, 9, 19]);
    assert_no_repaint("rolling_max", |d| series::rolling_max(d, 4), &data, &[3, 9, 19]);
}

#[test]
fn test_hurst_no_repaint() {
    let data = sample_prices();
    let hurst = HurstExponent::new(10);
    assert_no_repaint("Hurst", |d| hurst.calculate(d), &data, &[9, 14, 19]);
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_engines_idempotent() {
    let mut data = sample_prices();
    data[7] = f64::NAN;

    assert_idempotent("SMA", |d| SMA::new(4).calculate(d), &data);
    assert_idempotent("EMA", |d| EMA::new(4).calculate(d), &data);
    assert_idempotent("Butterworth", |d| Butterworth::default().calculate(d), &data);
    assert_idempotent("RSI", |d| RSI::new(4).calculate(d), &data);
    assert_idempotent("Hurst", |d| HurstExponent::new(8).calculate(d), &data);
}

// ============================================================================
// Absent Inputs
// ============================================================================

#[test]
fn test_gap_does_not_poison_later_output() {
    let mut data = sample_prices();
    data[6] = f64::NAN;

    let sma = SMA::new(3).calculate(&data);
    assert!(sma[12..].iter().all(|v| v.is_finite()));

    let ema = EMA::new(3).calculate(&data);
    assert!(ema[6..].iter().all(|v| v.is_finite()));

    let rsi = RSI::new(3).calculate(&data);
    assert!(rsi[6..].iter().all(|v| v.is_finite()));

    let hurst = HurstExponent::new(5).calculate(&data);
    assert!(hurst[11..].iter().all(|v| v.is_finite()));
}

#[test]
fn test_short_history_is_absent_not_error() {
    let data = &sample_prices()[..3];

    let out = RSI::new(14).compute_close(data).unwrap();
    assert!(out.primary.iter().all(|v| v.is_nan()));

    let out = HurstExponent::new(60).compute_close(data).unwrap();
    assert!(out.primary.iter().all(|v| v.is_nan()));
}
