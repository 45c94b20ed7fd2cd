//! Error types for the state layer

use thiserror::Error;

/// Result type for state operations
pub type Result<T> = std::result::Result<T, Error>;

/// State layer errors
#[derive(Error, Debug)]
pub enum Error {
    /// Storage error (RocksDB)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Malformed stored bytes. Non-retryable: the ledger entry itself is
    /// damaged, so callers must treat this as a corruption signal.
    #[error("Corrupt state: {0}")]
    Corrupt(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rocksdb::Error> for Error {
    fn from(err: rocksdb::Error) -> Self {
        Error::Storage(err.to_string())
    }
}
