//! End-to-end demo flow
//!
//! Bootstraps the default marketplace in memory, then walks one full trade:
//! a buyer's gas request is accepted, the buyer's meter reports delivery,
//! reconciliation raises an invoice, and settlement moves the funds. A
//! second, short delivery raises an incident instead.

use anyhow::Result;
use ledger_state::{CompanyId, FlowMeterReading, MemoryStore};
use rust_decimal::Decimal;
use std::sync::Arc;
use trading_engine::{Config, ReconciliationOutcome, SettlementOutcome, TradingEngine};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting GridTrade demo");

    let engine = TradingEngine::with_store(Arc::new(MemoryStore::new()), Config::default())?;
    engine.bootstrap()?;

    let buyer = CompanyId::new("BUYER1");
    let shipper = CompanyId::new("SHIPPER1");
    let now_ms = chrono::Utc::now().timestamp_millis();

    // BUYER1 requests 150 MWh from SHIPPER1, who accepts.
    let contract = engine.create_contract(
        ledger_state::ContractKind::Gas,
        2001,
        buyer.clone(),
        shipper.clone(),
        Decimal::from(150),
        "1/1/2026",
        "1/2/2026",
        Some("Steinitz"),
    )?;
    engine.update_contract_status("2001", ledger_state::ContractStatus::Accepted)?;

    // The buyer's meter confirms the full delivery.
    let outcomes = engine.ingest(FlowMeterReading {
        device_id: "GasFlowMeter_1".to_string(),
        device_location: "Steinitz".to_string(),
        company_id: buyer.clone(),
        pressure_kpa: 100,
        temperature_c: 20,
        specific_gravity: 0.65,
        energy_mwh: Decimal::from(150),
        timestamp_ms: now_ms,
    })?;

    let invoice = match outcomes.as_slice() {
        [ReconciliationOutcome::Invoiced(invoice)] => invoice.clone(),
        other => anyhow::bail!("expected one invoice, got {:?}", other),
    };
    tracing::info!(invoice_id = invoice.id, "Invoice raised");

    // Settle: 150 MWh at SHIPPER1's declared 14/MWh moves 2100.
    match engine.pay_invoice(&invoice.id.to_string(), &contract.key(), now_ms)? {
        SettlementOutcome::Settled {
            cost,
            initiator,
            receiver,
            ..
        } => {
            tracing::info!(
                %cost,
                buyer_balance = %initiator.bank_balance,
                shipper_balance = %receiver.bank_balance,
                "Settled"
            );
        }
        SettlementOutcome::InsufficientFunds { balance, required } => {
            anyhow::bail!("demo buyer short of funds: {} < {}", balance, required);
        }
    }

    // A second, short delivery raises an incident instead of an invoice.
    let outcomes = engine.ingest(FlowMeterReading {
        device_id: "GasFlowMeter_1".to_string(),
        device_location: "Steinitz".to_string(),
        company_id: buyer,
        pressure_kpa: 100,
        temperature_c: 20,
        specific_gravity: 0.65,
        energy_mwh: Decimal::new(1495, 1), // 149.5
        timestamp_ms: now_ms + 1,
    })?;

    if let [ReconciliationOutcome::IncidentRaised(incident)] = outcomes.as_slice() {
        tracing::info!(
            incident_id = incident.id,
            expected = %incident.expected_energy_mwh,
            actual = %incident.actual_energy_mwh,
            "Incident raised for under-delivery"
        );
    }

    let envelope = engine.query("getCompanyList", &["all".to_string()])?;
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    Ok(())
}
