//! # overlay
//!
//! Command-line runner for the overlay indicators. Reads bars from CSV or
//! JSON, runs one indicator and writes its plots as JSON.

mod bars;
mod config;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicator_facade::{
    HurstRegimeDetector, OHLCSeries, ReturnsHistogram, RsiDivergence, TrendStrengthCandles,
};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::OverlayConfig;

#[derive(Parser)]
#[command(name = "overlay")]
#[command(about = "Chart overlay indicators", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct IoArgs {
    /// Bar file (CSV with open/high/low/close columns, or JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// JSON configuration file with optional per-indicator sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// RSI with regular and hidden divergences
    RsiDivergence {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Smoothed Hurst exponent regime
    Hurst {
        #[command(flatten)]
        io: IoArgs,
    },

    /// ATR-normalized trend strength candle colors
    TrendStrength {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Distribution of percent returns
    Returns {
        #[command(flatten)]
        io: IoArgs,
    },
}

impl Commands {
    fn io(&self) -> &IoArgs {
        match self {
            Commands::RsiDivergence { io }
            | Commands::Hurst { io }
            | Commands::TrendStrength { io }
            | Commands::Returns { io } => io,
        }
    }
}

fn run_rsi_divergence(config: OverlayConfig, data: &OHLCSeries) -> Result<Value> {
    let indicator = RsiDivergence::new(config.rsi_divergence).context("rsi_divergence config")?;
    let output = indicator.calculate(data)?;
    info!(events = output.divergence.events.len(), "rsi divergences computed");

    Ok(json!({
        "indicator": "rsi_divergence",
        "bars": data.len(),
        "events": output.divergence.events,
        "state": output.divergence.state,
        "plots": indicator.plots(&output),
    }))
}

fn run_hurst(config: OverlayConfig, data: &OHLCSeries) -> Result<Value> {
    let detector = HurstRegimeDetector::new(config.hurst).context("hurst config")?;
    let output = detector.calculate(&data.close);
    info!(regime = ?output.current(), "hurst computed");

    Ok(json!({
        "indicator": "hurst",
        "bars": data.len(),
        "regime": output.current(),
        "plots": detector.plots(&output),
    }))
}

fn run_trend_strength(config: OverlayConfig, data: &OHLCSeries) -> Result<Value> {
    let indicator = TrendStrengthCandles::new(config.trend_strength).context("trend_strength config")?;
    let output = indicator.calculate(&data.high, &data.low, &data.close);
    info!(method = ?indicator.config().method, "trend strength computed");

    Ok(json!({
        "indicator": "trend_strength",
        "bars": data.len(),
        "plots": indicator.plots(&output),
    }))
}

fn run_returns(config: OverlayConfig, data: &OHLCSeries) -> Result<Value> {
    let indicator = ReturnsHistogram::new(config.returns).context("returns config")?;
    let chart = indicator
        .calculate(&data.close)
        .context("not enough returns for a distribution")?;
    info!(
        sample = chart.summary.sample_size,
        current = chart.summary.current,
        "returns distribution computed"
    );

    Ok(json!({
        "indicator": "returns",
        "bars": data.len(),
        "chart": chart,
    }))
}

fn write_output(value: &Value, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
            info!(path = %path.display(), "output written");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, value)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "overlay=info,indicator_swing=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let args = cli.command.io();

    let config = OverlayConfig::load(args.config.as_deref())?;
    let data = bars::load_bars(&args.input)?;
    info!(bars = data.len(), input = %args.input.display(), "bars loaded");

    let value = match &cli.command {
        Commands::RsiDivergence { .. } => run_rsi_divergence(config, &data)?,
        Commands::Hurst { .. } => run_hurst(config, &data)?,
        Commands::TrendStrength { .. } => run_trend_strength(config, &data)?,
        Commands::Returns { .. } => run_returns(config, &data)?,
    };

    write_output(&value, args.output.as_ref())
}
