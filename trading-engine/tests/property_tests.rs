//! Property-based tests for settlement and reconciliation invariants
//!
//! - Conservation: a successful settlement never creates or destroys money,
//!   for any balances, price, and energy amount
//! - Fail-closed: an insufficient balance leaves every record untouched
//! - Classification: delivered >= contracted invoices, anything less
//!   raises an incident, with equality on the invoice side

use ledger_state::{
    BusinessPlan, Company, CompanyId, ContractKind, ContractStatus, FlowMeterReading, MemoryStore,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use trading_engine::{Config, ReconciliationOutcome, SettlementOutcome, TradingEngine};

fn engine() -> TradingEngine {
    let engine =
        TradingEngine::with_store(Arc::new(MemoryStore::new()), Config::default()).unwrap();
    engine.bootstrap().unwrap();
    engine
}

fn reading(company: &str, energy: Decimal, timestamp_ms: i64) -> FlowMeterReading {
    FlowMeterReading {
        device_id: "GasFlowMeter_1".to_string(),
        device_location: "Location 1".to_string(),
        company_id: CompanyId::new(company),
        pressure_kpa: 100,
        temperature_c: 20,
        specific_gravity: 0.65,
        energy_mwh: energy,
        timestamp_ms,
    }
}

/// Energy with up to 3 fractional digits, strictly positive. The upper
/// bound is high enough that settlement costs can exceed the funded
/// balances, so both settlement branches get exercised.
fn energy_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..5_000_000i64).prop_map(|millis| Decimal::new(millis, 3))
}

/// Gas price with up to 2 fractional digits, strictly positive
fn price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: settlement either conserves the two balances exactly or
    /// refuses and changes nothing
    #[test]
    fn prop_settlement_conserves_money(
        energy in energy_strategy(),
        price in price_strategy(),
        topup in 0i64..200_000i64,
    ) {
        let engine = engine();

        // Receiver's declared price is what the contract settles at
        engine.update_business_plan(&BusinessPlan {
            id: "PRODUCER1_PLAN".to_string(),
            date: "1/1/2026".to_string(),
            gas_price: price,
            entry_location: "Wardenburg".to_string(),
            entry_capacity: 200,
            exit_location: "Wardenburg".to_string(),
            exit_capacity: 200,
            company_id: CompanyId::new("PRODUCER1"),
        }).unwrap();
        engine.topup_balance(&CompanyId::new("SHIPPER1"), Decimal::from(topup), 1).unwrap();

        engine.create_contract(
            ContractKind::Trade,
            1001,
            CompanyId::new("SHIPPER1"),
            CompanyId::new("PRODUCER1"),
            energy,
            "1/1/2026",
            "1/2/2026",
            None,
        ).unwrap();
        engine.update_contract_status("1001", ContractStatus::Accepted).unwrap();

        let outcomes = engine.ingest(reading("PRODUCER1", energy, 99)).unwrap();
        prop_assert!(matches!(outcomes[0], ReconciliationOutcome::Invoiced(_)));

        let before_initiator: Company = engine.repository().get("SHIPPER1").unwrap().unwrap();
        let before_receiver: Company = engine.repository().get("PRODUCER1").unwrap().unwrap();
        let total_before = before_initiator.bank_balance + before_receiver.bank_balance;

        let cost = energy * price;
        match engine.pay_invoice("99", "1001", 7).unwrap() {
            SettlementOutcome::Settled { cost: paid, initiator, receiver, invoice } => {
                prop_assert!(before_initiator.bank_balance >= cost);
                prop_assert_eq!(paid, cost);
                prop_assert_eq!(initiator.bank_balance, before_initiator.bank_balance - cost);
                prop_assert_eq!(receiver.bank_balance, before_receiver.bank_balance + cost);
                prop_assert_eq!(
                    initiator.bank_balance + receiver.bank_balance,
                    total_before
                );
                prop_assert_eq!(invoice.payment_date_ms, 7);
            }
            SettlementOutcome::InsufficientFunds { balance, required } => {
                prop_assert!(balance < required);
                prop_assert_eq!(required, cost);

                // Fail-closed: stored records unchanged
                let after_initiator: Company =
                    engine.repository().get("SHIPPER1").unwrap().unwrap();
                let after_receiver: Company =
                    engine.repository().get("PRODUCER1").unwrap().unwrap();
                prop_assert_eq!(
                    after_initiator.bank_balance,
                    before_initiator.bank_balance
                );
                prop_assert_eq!(after_receiver.bank_balance, before_receiver.bank_balance);
            }
        }
    }

    /// Property: the delivery classifier is exactly the >= comparison
    #[test]
    fn prop_classification_boundary(
        contracted in energy_strategy(),
        delivered in energy_strategy(),
    ) {
        let engine = engine();

        engine.create_contract(
            ContractKind::Trade,
            1001,
            CompanyId::new("SHIPPER1"),
            CompanyId::new("PRODUCER1"),
            contracted,
            "1/1/2026",
            "1/2/2026",
            None,
        ).unwrap();
        engine.update_contract_status("1001", ContractStatus::Accepted).unwrap();

        let outcomes = engine.ingest(reading("PRODUCER1", delivered, 5)).unwrap();
        prop_assert_eq!(outcomes.len(), 1);

        match &outcomes[0] {
            ReconciliationOutcome::Invoiced(invoice) => {
                prop_assert!(delivered >= contracted);
                prop_assert_eq!(invoice.contract_id, 1001);
            }
            ReconciliationOutcome::IncidentRaised(incident) => {
                prop_assert!(delivered < contracted);
                prop_assert_eq!(incident.expected_energy_mwh, contracted);
                prop_assert_eq!(incident.actual_energy_mwh, delivered);
            }
        }
    }

    /// Property: equal delivery always invoices, never raises an incident
    #[test]
    fn prop_equality_is_fulfilment(contracted in energy_strategy()) {
        let engine = engine();

        engine.create_contract(
            ContractKind::Trade,
            1001,
            CompanyId::new("SHIPPER1"),
            CompanyId::new("PRODUCER1"),
            contracted,
            "1/1/2026",
            "1/2/2026",
            None,
        ).unwrap();
        engine.update_contract_status("1001", ContractStatus::Accepted).unwrap();

        let outcomes = engine.ingest(reading("PRODUCER1", contracted, 5)).unwrap();
        prop_assert!(matches!(outcomes[0], ReconciliationOutcome::Invoiced(_)));
        prop_assert!(engine.incidents_for(1001).unwrap().is_empty());
    }
}
