//! Overlay configuration file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use indicator_facade::{
    HurstConfig, RSIDivergenceConfig, ReturnsDistributionConfig, TrendStrengthConfig,
};
use serde::{Deserialize, Serialize};

/// One section per indicator; absent sections take defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    pub rsi_divergence: RSIDivergenceConfig,
    pub hurst: HurstConfig,
    pub trend_strength: TrendStrengthConfig,
    pub returns: ReturnsDistributionConfig,
}

impl OverlayConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }
}
