//! Engine façade
//!
//! Ties the entity repository and metrics together behind one handle. Every
//! operation is a synchronous read-then-write against the store: the hosting
//! ledger runs one invocation at a time, so the engine holds no locks and
//! spawns nothing.

use crate::{config::Config, metrics::Metrics, Result};
use ledger_state::{IndexScheme, KvStore, Repository, RocksStore};
use std::sync::Arc;

/// The settlement engine handle
pub struct TradingEngine {
    /// Entity repository
    pub(crate) repo: Repository,

    /// Prometheus counters
    pub(crate) metrics: Metrics,

    /// Configuration
    pub(crate) config: Config,
}

impl TradingEngine {
    /// Open an engine backed by RocksDB at the configured data directory
    pub fn open(config: Config) -> Result<Self> {
        let ledger_config = ledger_state::Config {
            data_dir: config.ledger_data_dir.clone(),
            ..Default::default()
        };
        let store: Arc<dyn KvStore> = Arc::new(RocksStore::open(&ledger_config)?);

        tracing::info!(service = %config.service_name, "Trading engine opened");

        Self::with_store_and_scheme(store, ledger_config.scheme, config)
    }

    /// Build an engine over any store (in-memory for tests and demos)
    pub fn with_store(store: Arc<dyn KvStore>, config: Config) -> Result<Self> {
        Self::with_store_and_scheme(store, IndexScheme::default(), config)
    }

    fn with_store_and_scheme(
        store: Arc<dyn KvStore>,
        scheme: IndexScheme,
        config: Config,
    ) -> Result<Self> {
        Ok(Self {
            repo: Repository::new(store, scheme),
            metrics: Metrics::new()?,
            config,
        })
    }

    /// The underlying repository
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Engine metrics
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
