//! Indicator benchmarks.
//!
//! Run with: cargo bench -p indicator-core

use std::time::Instant;

fn bench<F: Fn()>(name: &str, iterations: usize, f: F) {
    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("{}: {:?} per iteration ({} iterations)", name, per_iter, iterations);
}

fn generate_data(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let high: Vec<f64> = (0..n).map(|i| 105.0 + (i as f64 * 0.1).sin() * 10.0).collect();
    let low: Vec<f64> = (0..n).map(|i| 95.0 + (i as f64 * 0.1).sin() * 10.0).collect();
    let close: Vec<f64> = (0..n)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0 + (i as f64 * 0.37).cos())
        .collect();
    (high, low, close)
}

fn main() {
    use indicator_core::*;

    let sizes = [100, 1000, 10000];

    for &size in &sizes {
        println!("\n=== Data size: {} ===\n", size);

        let (high, low, close) = generate_data(size);
        let iterations = if size < 1000 { 10000 } else if size < 10000 { 1000 } else { 100 };

        println!("--- Series ---");

        bench(&format!("rolling_max(60) n={}", size), iterations, || {
            let _ = series::rolling_max(&close, 60);
        });

        bench(&format!("SMA(20) n={}", size), iterations, || {
            let _ = SMA::new(20).calculate(&close);
        });

        bench(&format!("EMA(20) n={}", size), iterations, || {
            let _ = EMA::new(20).calculate(&close);
        });

        println!("--- Filters / Oscillators ---");

        bench(&format!("Butterworth(10) n={}", size), iterations, || {
            let _ = Butterworth::default().calculate(&close);
        });

        bench(&format!("RSI(14) n={}", size), iterations, || {
            let _ = RSI::new(14).calculate(&close);
        });

        bench(&format!("ATR(14) n={}", size), iterations, || {
            let _ = ATR::new(14).calculate(&high, &low, &close);
        });

        println!("--- Statistical ---");

        bench(&format!("Hurst(60) n={}", size), iterations / 10 + 1, || {
            let _ = HurstExponent::new(60).calculate(&close);
        });

        bench(&format!("ReturnsDistribution n={}", size), iterations, || {
            let _ = ReturnsDistribution::default().calculate(&close);
        });
    }
}
