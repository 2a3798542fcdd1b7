//! Series utilities.
//!
//! Null-safe building blocks shared by every engine. A series is a `Vec<f64>`
//! index-aligned with the bar sequence; NaN marks an absent value.

/// Whether a series element holds a value.
#[inline]
pub fn is_present(value: f64) -> bool {
    !value.is_nan()
}

/// A series of `len` absent values.
pub fn absent(len: usize) -> Vec<f64> {
    vec![f64::NAN; len]
}

/// A series holding `value` at every index.
pub fn constant(len: usize, value: f64) -> Vec<f64> {
    vec![value; len]
}

/// Lag a series by `k` bars: `out[i] = src[i - k]`, absent for `i < k`.
pub fn shift(src: &[f64], k: usize) -> Vec<f64> {
    (0..src.len())
        .map(|i| if i >= k { src[i - k] } else { f64::NAN })
        .collect()
}

/// Rolling minimum over the `len` most recent values.
///
/// Absent values are skipped; a window with no present value is absent, as is
/// every index before the first full window.
pub fn rolling_min(src: &[f64], len: usize) -> Vec<f64> {
    rolling_extremum(src, len, f64::INFINITY, |v, best| v < best)
}

/// Rolling maximum over the `len` most recent values.
pub fn rolling_max(src: &[f64], len: usize) -> Vec<f64> {
    rolling_extremum(src, len, f64::NEG_INFINITY, |v, best| v > best)
}

/// Linear scan with strict comparison, so the earliest extreme wins ties.
fn rolling_extremum<F>(src: &[f64], len: usize, seed: f64, better: F) -> Vec<f64>
where
    F: Fn(f64, f64) -> bool,
{
    let mut out = absent(src.len());
    if len == 0 {
        return out;
    }

    for i in (len - 1)..src.len() {
        let mut best = seed;
        for &v in &src[i + 1 - len..=i] {
            // NaN compares false, which drops absent values.
            if better(v, best) {
                best = v;
            }
        }
        if best != seed {
            out[i] = best;
        }
    }

    out
}

/// Per-index map over one series. The closure sees absent values as NaN.
pub fn for_every<F>(src: &[f64], mut f: F) -> Vec<f64>
where
    F: FnMut(usize, f64) -> f64,
{
    src.iter().enumerate().map(|(i, &v)| f(i, v)).collect()
}
