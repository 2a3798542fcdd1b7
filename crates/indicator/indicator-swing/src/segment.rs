//! Segment interpolation between two points of a series.

/// Dash pattern of dotted segments: a point is drawn when
/// `(j - i0) % DASH_PERIOD < DASH_ON`.
pub const DASH_PERIOD: usize = 4;
pub const DASH_ON: usize = 2;

/// Linearly interpolate `v0..=v1` into `target[i0..=i1]`.
///
/// No-op unless `i0 < i1 < target.len()`.
pub fn draw_segment(target: &mut [f64], i0: usize, i1: usize, v0: f64, v1: f64) {
    if i1 <= i0 || i1 >= target.len() {
        return;
    }
    let span = (i1 - i0) as f64;
    for j in i0..=i1 {
        let t = (j - i0) as f64 / span;
        target[j] = v0 + t * (v1 - v0);
    }
}

/// Same interpolation as [`draw_segment`], with every other pair of points
/// left absent.
pub fn draw_segment_dotted(target: &mut [f64], i0: usize, i1: usize, v0: f64, v1: f64) {
    if i1 <= i0 || i1 >= target.len() {
        return;
    }
    let span = (i1 - i0) as f64;
    for j in i0..=i1 {
        let t = (j - i0) as f64 / span;
        target[j] = if (j - i0) % DASH_PERIOD < DASH_ON {
            v0 + t * (v1 - v0)
        } else {
            f64::NAN
        };
    }
}
