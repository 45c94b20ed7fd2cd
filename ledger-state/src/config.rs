//! Configuration for the state layer

use crate::registry::IndexScheme;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// State layer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory for RocksDB
    pub data_dir: PathBuf,

    /// RocksDB configuration
    pub rocksdb: RocksDbConfig,

    /// Index key scheme
    pub scheme: IndexScheme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data/ledger"),
            rocksdb: RocksDbConfig::default(),
            scheme: IndexScheme::default(),
        }
    }
}

/// RocksDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocksDbConfig {
    /// Write buffer size (MB)
    pub write_buffer_size_mb: usize,

    /// Max write buffers
    pub max_write_buffer_number: i32,

    /// Target file size (MB)
    pub target_file_size_mb: u64,

    /// Max background jobs (compaction + flush)
    pub max_background_jobs: i32,

    /// Level 0 file num compaction trigger
    pub level0_file_num_compaction_trigger: i32,

    /// Enable statistics
    pub enable_statistics: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            write_buffer_size_mb: 64,
            max_write_buffer_number: 4,
            target_file_size_mb: 64,
            max_background_jobs: 2,
            level0_file_num_compaction_trigger: 4,
            enable_statistics: false,
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

        if let Ok(data_dir) = std::env::var("LEDGER_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scheme.master_list, "ALLKEYS");
        assert_eq!(config.rocksdb.max_write_buffer_number, 4);
    }
}
