//! Metrics collection for observability
//!
//! Prometheus counters in an owned registry; nothing registers into the
//! process-wide default registry, so independent engines never collide.
//!
//! # Metrics
//!
//! - `trading_invokes_total` - State-mutating operations dispatched
//! - `trading_queries_total` - Read-only operations dispatched
//! - `trading_invoices_total` - Invoices emitted by reconciliation
//! - `trading_incidents_total` - Incidents raised by reconciliation
//! - `trading_settlements_total` - Invoices settled
//! - `trading_settlements_rejected_total` - Settlements refused for funds

use prometheus::{IntCounter, Opts, Registry};
use std::sync::Arc;

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    /// State-mutating operations dispatched
    pub invokes_total: IntCounter,

    /// Read-only operations dispatched
    pub queries_total: IntCounter,

    /// Invoices emitted by reconciliation
    pub invoices_total: IntCounter,

    /// Incidents raised by reconciliation
    pub incidents_total: IntCounter,

    /// Invoices settled
    pub settlements_total: IntCounter,

    /// Settlements refused for insufficient funds
    pub settlements_rejected_total: IntCounter,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let invokes_total = IntCounter::with_opts(Opts::new(
            "trading_invokes_total",
            "State-mutating operations dispatched",
        ))?;
        registry.register(Box::new(invokes_total.clone()))?;

        let queries_total = IntCounter::with_opts(Opts::new(
            "trading_queries_total",
            "Read-only operations dispatched",
        ))?;
        registry.register(Box::new(queries_total.clone()))?;

        let invoices_total = IntCounter::with_opts(Opts::new(
            "trading_invoices_total",
            "Invoices emitted by telemetry reconciliation",
        ))?;
        registry.register(Box::new(invoices_total.clone()))?;

        let incidents_total = IntCounter::with_opts(Opts::new(
            "trading_incidents_total",
            "Incidents raised by telemetry reconciliation",
        ))?;
        registry.register(Box::new(incidents_total.clone()))?;

        let settlements_total = IntCounter::with_opts(Opts::new(
            "trading_settlements_total",
            "Invoices settled",
        ))?;
        registry.register(Box::new(settlements_total.clone()))?;

        let settlements_rejected_total = IntCounter::with_opts(Opts::new(
            "trading_settlements_rejected_total",
            "Settlements refused for insufficient funds",
        ))?;
        registry.register(Box::new(settlements_rejected_total.clone()))?;

        Ok(Self {
            invokes_total,
            queries_total,
            invoices_total,
            incidents_total,
            settlements_total,
            settlements_rejected_total,
            registry,
        })
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
