//! Contract lifecycle
//!
//! Contracts move `New → Accepted → {Rejected, Completed}`. Status values
//! are a closed set parsed at the boundary; no transition table is enforced
//! beyond that. Listing is a read-time join over current company records,
//! the receiver's plan, and the contract's invoice/incident history.

use crate::{engine::TradingEngine, error::Error, types::ContractInfo, Result};
use ledger_state::{
    BusinessPlan, Company, CompanyId, Contract, ContractKind, ContractStatus, Incident, Invoice,
};
use rust_decimal::Decimal;

impl TradingEngine {
    /// Create a contract in state `New` and index it under its kind.
    ///
    /// The seventh positional argument of a gas request is the buyer's
    /// entry location; every other kind defaults to the market region.
    #[allow(clippy::too_many_arguments)]
    pub fn create_contract(
        &self,
        kind: ContractKind,
        id: i64,
        initiator_id: CompanyId,
        receiver_id: CompanyId,
        energy_mwh: Decimal,
        start_date: &str,
        end_date: &str,
        entry_location: Option<&str>,
    ) -> Result<Contract> {
        if initiator_id.as_str().is_empty() || receiver_id.as_str().is_empty() {
            return Err(Error::InvalidArgument(
                "contract parties must be named".to_string(),
            ));
        }
        if initiator_id == receiver_id {
            return Err(Error::InvalidArgument(format!(
                "contract {} names {} as both parties",
                id, initiator_id
            )));
        }
        if energy_mwh <= Decimal::ZERO {
            return Err(Error::InvalidArgument(format!(
                "contract energy must be positive, got {}",
                energy_mwh
            )));
        }
        if start_date.is_empty() || end_date.is_empty() {
            return Err(Error::InvalidArgument(
                "contract dates must be set".to_string(),
            ));
        }

        let contract = Contract {
            id,
            initiator_id,
            receiver_id,
            energy_mwh,
            entry_location: entry_location.unwrap_or("Europe").to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            status: ContractStatus::New,
        };
        self.repo.create_contract(kind, &contract)?;

        tracing::info!(contract_id = id, ?kind, energy = %contract.energy_mwh, "Contract created");
        Ok(contract)
    }

    /// Replace a contract's status
    pub fn update_contract_status(
        &self,
        contract_id: &str,
        status: ContractStatus,
    ) -> Result<Contract> {
        let mut contract: Contract = self
            .repo
            .get(contract_id)?
            .ok_or_else(|| Error::NotFound(format!("contract {}", contract_id)))?;

        contract.status = status;
        self.repo.put(contract_id, &contract)?;

        tracing::info!(contract_id, ?status, "Contract status updated");
        Ok(contract)
    }

    /// Every contract of a kind the company is party to, enriched with the
    /// party records, the receiver's plan, and invoice/incident lists.
    /// Index entries whose contract entity is gone are skipped.
    pub fn list_contracts(
        &self,
        kind: ContractKind,
        company_id: &CompanyId,
    ) -> Result<Vec<ContractInfo>> {
        let mut infos = Vec::new();
        for key in self.repo.list(self.repo.scheme().contract_list(kind))? {
            let Some(contract) = self.repo.get::<Contract>(&key)? else {
                continue;
            };
            if !contract.involves(company_id) {
                continue;
            }

            let initiator_company: Company = self
                .repo
                .get(contract.initiator_id.as_str())?
                .ok_or_else(|| Error::NotFound(format!("company {}", contract.initiator_id)))?;
            let receiver_company: Company = self
                .repo
                .get(contract.receiver_id.as_str())?
                .ok_or_else(|| Error::NotFound(format!("company {}", contract.receiver_id)))?;

            // The receiver prices the contract; a Buyer receiver has no plan.
            let business_plan: Option<BusinessPlan> = self
                .repo
                .get(&self.repo.scheme().plan_key(&contract.receiver_id))?;

            let invoice_list = self.invoices_for(contract.id)?;
            let incident_list = self.incidents_for(contract.id)?;

            infos.push(ContractInfo {
                contract,
                initiator_company,
                receiver_company,
                business_plan,
                invoice_list,
                incident_list,
            });
        }

        Ok(infos)
    }

    /// Accepted contracts of a kind the company is party to
    pub fn accepted_contracts(
        &self,
        kind: ContractKind,
        company_id: &CompanyId,
    ) -> Result<Vec<Contract>> {
        let mut contracts = Vec::new();
        for key in self.repo.list(self.repo.scheme().contract_list(kind))? {
            let Some(contract) = self.repo.get::<Contract>(&key)? else {
                continue;
            };
            if contract.involves(company_id) && contract.status == ContractStatus::Accepted {
                contracts.push(contract);
            }
        }

        Ok(contracts)
    }

    /// Invoices raised against a contract, oldest first
    pub fn invoices_for(&self, contract_id: i64) -> Result<Vec<Invoice>> {
        let mut invoices = Vec::new();
        for key in self.repo.list(&self.repo.scheme().invoice_list(contract_id))? {
            if let Some(invoice) = self.repo.get::<Invoice>(&key)? {
                invoices.push(invoice);
            }
        }
        Ok(invoices)
    }

    /// Incidents raised against a contract, oldest first
    pub fn incidents_for(&self, contract_id: i64) -> Result<Vec<Incident>> {
        let mut incidents = Vec::new();
        for key in self.repo.list(&self.repo.scheme().incident_list(contract_id))? {
            if let Some(incident) = self.repo.get::<Incident>(&key)? {
                incidents.push(incident);
            }
        }
        Ok(incidents)
    }
}
