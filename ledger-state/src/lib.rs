//! GridTrade State Layer
//!
//! Normalized entity storage for the energy-trading marketplace, on top of
//! an opaque key-value ledger.
//!
//! # Architecture
//!
//! - **KV adapter**: `get`/`put`/`delete` by string key, nothing else;
//!   replication and consistency belong to the hosting ledger platform
//! - **Codec**: entities are JSON documents with a fixed field vocabulary
//! - **Index scheme**: stored ID lists are the only enumeration mechanism
//! - **Repository**: every create writes the entity, then registers its
//!   key, in that order, in the same call
//!
//! # Invariants
//!
//! - An indexed key always points at a written entity
//! - Per-type ID lists are append-only and duplicate-tolerant
//! - The master key list deduplicates single-key registrations only
//! - List enumeration order is insertion order

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod codec;
pub mod config;
pub mod error;
pub mod registry;
pub mod repository;
pub mod store;
pub mod types;

// Re-exports
pub use config::{Config, RocksDbConfig};
pub use error::{Error, Result};
pub use registry::IndexScheme;
pub use repository::Repository;
pub use store::{KvStore, MemoryStore, RocksStore};
pub use types::{
    BusinessPlan, Company, CompanyId, CompanyType, Contract, ContractKind, ContractStatus,
    FlowMeterReading, Incident, IncidentStatus, Invoice, PaymentStatus, User,
};
