//! Telemetry reconciliation
//!
//! Each flow-meter reading is appended to its company's telemetry list and
//! then classified against every accepted contract the company is party to
//! in its role's contract index: delivered energy at or above the
//! contracted amount raises an invoice, anything less raises an incident.
//! Outcomes already written stay written if a later contract in the same
//! ingest fails; there is no cross-contract rollback.
//!
//! Sensor values are stored as received. No bounds are enforced on
//! pressure, temperature, or specific gravity.

use crate::{engine::TradingEngine, Result};
use ledger_state::{
    Company, CompanyId, FlowMeterReading, Incident, IncidentStatus, Invoice, PaymentStatus,
};

/// What reconciliation produced for one contract
#[derive(Debug, Clone, PartialEq)]
pub enum ReconciliationOutcome {
    /// Delivered energy met the contract; an invoice is now pending
    Invoiced(Invoice),
    /// Delivered energy fell short; an incident records the gap
    IncidentRaised(Incident),
}

impl TradingEngine {
    /// Ingest one reading: store it, then reconcile the reporter's accepted
    /// contracts. A company with no role mapping (a Shipper) or no ledger
    /// record stores the reading and reconciles nothing.
    pub fn ingest(&self, reading: FlowMeterReading) -> Result<Vec<ReconciliationOutcome>> {
        self.repo.append_reading(&reading)?;

        tracing::debug!(
            company_id = %reading.company_id,
            device_id = %reading.device_id,
            energy = %reading.energy_mwh,
            "Reading stored"
        );

        let company: Option<Company> = self.repo.get(reading.company_id.as_str())?;
        let Some(kind) = company.and_then(|c| c.company_type.contract_kind()) else {
            return Ok(Vec::new());
        };

        let mut outcomes = Vec::new();
        for contract in self.accepted_contracts(kind, &reading.company_id)? {
            // IDs derive from the reading timestamp; later contracts in the
            // same ingest are offset so their records never share a key.
            let outcome_id = reading.timestamp_ms + outcomes.len() as i64;

            // Meeting the contracted amount exactly is fulfilment, so the
            // comparison is >= on exact decimals.
            if reading.energy_mwh >= contract.energy_mwh {
                let invoice = Invoice {
                    id: outcome_id,
                    invoice_date_ms: reading.timestamp_ms,
                    payment_status: PaymentStatus::Pending,
                    payment_date_ms: 0,
                    contract_id: contract.id,
                };
                self.repo.create_invoice(&invoice)?;
                self.metrics.invoices_total.inc();

                tracing::info!(
                    contract_id = contract.id,
                    invoice_id = invoice.id,
                    "Delivery fulfilled, invoice raised"
                );
                outcomes.push(ReconciliationOutcome::Invoiced(invoice));
            } else {
                let incident = Incident {
                    id: outcome_id,
                    incident_date_ms: reading.timestamp_ms,
                    incident_status: IncidentStatus::New,
                    expected_energy_mwh: contract.energy_mwh,
                    actual_energy_mwh: reading.energy_mwh,
                    contract_id: contract.id,
                };
                self.repo.create_incident(&incident)?;
                self.metrics.incidents_total.inc();

                tracing::warn!(
                    contract_id = contract.id,
                    expected = %incident.expected_energy_mwh,
                    actual = %incident.actual_energy_mwh,
                    "Under-delivery, incident raised"
                );
                outcomes.push(ReconciliationOutcome::IncidentRaised(incident));
            }
        }

        Ok(outcomes)
    }

    /// The readings a shipper's accepted contracts expose to it: trade and
    /// transport counterparties it buys from, and the buyers it supplies.
    pub fn shipper_readings(&self, shipper_id: &CompanyId) -> Result<Vec<FlowMeterReading>> {
        use ledger_state::ContractKind::{Gas, Trade, Transport};

        let mut readings = Vec::new();
        for contract in self.accepted_contracts(Trade, shipper_id)? {
            readings.extend(self.repo.readings(&contract.receiver_id)?);
        }
        for contract in self.accepted_contracts(Transport, shipper_id)? {
            readings.extend(self.repo.readings(&contract.receiver_id)?);
        }
        for contract in self.accepted_contracts(Gas, shipper_id)? {
            readings.extend(self.repo.readings(&contract.initiator_id)?);
        }

        Ok(readings)
    }
}
