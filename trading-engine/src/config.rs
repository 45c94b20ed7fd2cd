//! Configuration for the trading engine

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Trading engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Ledger data directory
    pub ledger_data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "trading-engine".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            ledger_data_dir: PathBuf::from("./data/ledger"),
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(dir) = std::env::var("TRADING_LEDGER_DIR") {
            config.ledger_data_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}
