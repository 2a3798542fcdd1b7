//! Moving Average Indicators

pub mod sma;
pub mod ema;

// Re-exports
pub use sma::SMA;
pub use ema::EMA;

use indicator_api::MovingAverageKind;

/// Run the moving average selected by `kind`.
pub fn moving_average(kind: MovingAverageKind, period: usize, data: &[f64]) -> Vec<f64> {
    match kind {
        MovingAverageKind::Ema => EMA::new(period).calculate(data),
        MovingAverageKind::Sma => SMA::new(period).calculate(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average_dispatch() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(moving_average(MovingAverageKind::Sma, 2, &data)[3], 3.5);
        assert_eq!(
            moving_average(MovingAverageKind::Ema, 3, &data),
            EMA::new(3).calculate(&data)
        );
    }
}
