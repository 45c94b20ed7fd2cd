//! Error types for the trading engine

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Engine errors
///
/// An insufficient settlement balance is deliberately *not* here: it is a
/// normal business outcome carried by
/// [`SettlementOutcome`](crate::settlement::SettlementOutcome), so callers
/// can show it to a user without conflating it with a systemic fault.
#[derive(Error, Debug)]
pub enum Error {
    /// Wrong number of positional arguments, rejected before any store access
    #[error("{operation}: expected {expected} argument(s), got {actual}")]
    ArgumentCount {
        /// Operation being dispatched
        operation: String,
        /// Required arity
        expected: usize,
        /// Supplied arity
        actual: usize,
    },

    /// A required entity lookup found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// A positional value failed to parse or a creation rule failed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unknown username or password mismatch
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Dispatch miss
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// State layer failure (storage or corrupt bytes)
    #[error("State error: {0}")]
    State(#[from] ledger_state::Error),

    /// Metrics registration failure
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<prometheus::Error> for Error {
    fn from(err: prometheus::Error) -> Self {
        Error::Metrics(err.to_string())
    }
}
