//! Settlement processor
//!
//! Pays an invoice by moving the contract's cost from the initiator's
//! account to the receiver's. The cost comes from the receiver's declared
//! gas price; all arithmetic is exact decimals, so the two balances sum to
//! the same total before and after every successful settlement.
//!
//! A shortfall fails closed: the engine reports the balance and the amount
//! due, and writes nothing.

use crate::{engine::TradingEngine, error::Error, Result};
use ledger_state::{BusinessPlan, Company, Contract, Invoice, PaymentStatus};
use rust_decimal::Decimal;

/// Result of a settlement attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SettlementOutcome {
    /// Funds moved and the invoice is paid
    Settled {
        /// Amount transferred
        cost: Decimal,
        /// Paid invoice
        invoice: Invoice,
        /// Debited initiator, post-transfer
        initiator: Company,
        /// Credited receiver, post-transfer
        receiver: Company,
    },
    /// The initiator cannot cover the invoice; nothing was written
    InsufficientFunds {
        /// The initiator's current balance
        balance: Decimal,
        /// The amount the invoice requires
        required: Decimal,
    },
}

impl TradingEngine {
    /// Settle an invoice against its contract at `now_ms`.
    ///
    /// Contract, plan, both companies, and the invoice are required
    /// lookups; a missing one aborts before any write.
    pub fn pay_invoice(
        &self,
        invoice_id: &str,
        contract_id: &str,
        now_ms: i64,
    ) -> Result<SettlementOutcome> {
        let contract: Contract = self
            .repo
            .get(contract_id)?
            .ok_or_else(|| Error::NotFound(format!("contract {}", contract_id)))?;

        // The receiver's declared price per MWh prices the whole contract.
        let plan: BusinessPlan = self
            .repo
            .get(&self.repo.scheme().plan_key(&contract.receiver_id))?
            .ok_or_else(|| {
                Error::NotFound(format!("business plan for {}", contract.receiver_id))
            })?;

        let cost = contract.energy_mwh * plan.gas_price;

        let mut initiator: Company = self
            .repo
            .get(contract.initiator_id.as_str())?
            .ok_or_else(|| Error::NotFound(format!("company {}", contract.initiator_id)))?;

        if initiator.bank_balance < cost {
            self.metrics.settlements_rejected_total.inc();

            tracing::warn!(
                invoice_id,
                contract_id,
                balance = %initiator.bank_balance,
                required = %cost,
                "Settlement refused, insufficient funds"
            );
            return Ok(SettlementOutcome::InsufficientFunds {
                balance: initiator.bank_balance,
                required: cost,
            });
        }

        let mut receiver: Company = self
            .repo
            .get(contract.receiver_id.as_str())?
            .ok_or_else(|| Error::NotFound(format!("company {}", contract.receiver_id)))?;

        let mut invoice: Invoice = self
            .repo
            .get(invoice_id)?
            .ok_or_else(|| Error::NotFound(format!("invoice {}", invoice_id)))?;

        initiator.bank_balance -= cost;
        initiator.balance_date_ms = now_ms;
        receiver.bank_balance += cost;
        receiver.balance_date_ms = now_ms;
        invoice.payment_status = PaymentStatus::Paid;
        invoice.payment_date_ms = now_ms;

        self.repo.put(initiator.id.as_str(), &initiator)?;
        self.repo.put(receiver.id.as_str(), &receiver)?;
        self.repo.put(invoice_id, &invoice)?;

        self.metrics.settlements_total.inc();

        tracing::info!(
            invoice_id,
            contract_id,
            %cost,
            initiator = %initiator.id,
            receiver = %receiver.id,
            "Invoice settled"
        );

        Ok(SettlementOutcome::Settled {
            cost,
            invoice,
            initiator,
            receiver,
        })
    }
}
