//! GridTrade Settlement Engine
//!
//! The domain layer of the energy-trading marketplace: contract lifecycle,
//! telemetry reconciliation, and money-conserving settlement over the
//! [`ledger_state`] entity repository.
//!
//! # Architecture
//!
//! External calls arrive through [`TradingEngine::invoke`] and
//! [`TradingEngine::query`] as an operation name plus positional string
//! arguments, and leave as a `SUCCESS`/`FAIL` envelope. Inside that
//! boundary everything is typed. The hosting ledger serializes calls, so
//! every operation runs to completion synchronously.
//!
//! # Invariants
//!
//! - Settlement conserves money: debits equal credits on every success
//! - Insufficient funds fails closed with no state mutation
//! - Telemetry at or above the contracted energy invoices; below raises an
//!   incident; outcomes already written survive later failures in the same
//!   ingest
//!
//! # Example
//!
//! ```no_run
//! use trading_engine::{Config, TradingEngine};
//!
//! fn main() -> trading_engine::Result<()> {
//!     let engine = TradingEngine::open(Config::default())?;
//!     engine.bootstrap()?;
//!
//!     let company_list = engine.query("getCompanyList", &["all".to_string()])?;
//!     println!("{}", serde_json::to_string(&company_list).unwrap());
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod bootstrap;
pub mod config;
pub mod contracts;
pub mod directory;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod settlement;
pub mod telemetry;
pub mod types;

// Re-exports
pub use config::Config;
pub use engine::TradingEngine;
pub use error::{Error, Result};
pub use metrics::Metrics;
pub use settlement::SettlementOutcome;
pub use telemetry::ReconciliationOutcome;
pub use types::{BusinessPlanInfo, ContractInfo, Envelope, StatusCode, UserInfo};
