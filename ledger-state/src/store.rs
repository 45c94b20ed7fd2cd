//! Key-value store adapter
//!
//! The hosting ledger hands this engine an opaque get/put/delete keyspace
//! with single-operation semantics: no transactions, no locking, no range
//! queries. Everything above this module enumerates state through stored
//! ID lists, so the keyspace stays flat: index lists are ordinary values.
//!
//! Two implementations: RocksDB for a real deployment, and an in-memory
//! map for tests and the demo flow.

use crate::{error::Result, Config};
use parking_lot::RwLock;
use rocksdb::{DBCompactionStyle, Options, DB};
use std::collections::BTreeMap;

/// Opaque key-value primitives supplied by the hosting ledger.
///
/// Absence of a key is `Ok(None)`, never an error.
pub trait KvStore: Send + Sync {
    /// Fetch raw bytes stored at `key`
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store raw bytes at `key`, replacing any previous value
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    fn delete(&self, key: &str) -> Result<()>;
}

/// RocksDB-backed store
pub struct RocksStore {
    db: DB,
}

impl RocksStore {
    /// Open or create the database at the configured path
    pub fn open(config: &Config) -> Result<Self> {
        let path = &config.data_dir;

        std::fs::create_dir_all(path)?;

        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);

        // Tuning from config
        db_opts.set_write_buffer_size(config.rocksdb.write_buffer_size_mb * 1024 * 1024);
        db_opts.set_max_write_buffer_number(config.rocksdb.max_write_buffer_number);
        db_opts.set_target_file_size_base(config.rocksdb.target_file_size_mb * 1024 * 1024);
        db_opts.set_max_background_jobs(config.rocksdb.max_background_jobs);
        db_opts.set_level_zero_file_num_compaction_trigger(
            config.rocksdb.level0_file_num_compaction_trigger,
        );

        // Universal compaction for write-heavy workload
        db_opts.set_compaction_style(DBCompactionStyle::Universal);

        if config.rocksdb.enable_statistics {
            db_opts.enable_statistics();
        }

        let db = DB::open(&db_opts, path)?;

        tracing::info!("Opened RocksDB at {:?}", path);

        Ok(Self { db })
    }
}

impl KvStore for RocksStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.db.get(key.as_bytes())?)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.db.put(key.as_bytes(), value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.db.delete(key.as_bytes())?;
        Ok(())
    }
}

/// In-memory store for tests and demos
#[derive(Default)]
pub struct MemoryStore {
    map: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.map.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.map.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.map.write().remove(key);
        Ok(())
    }
}
