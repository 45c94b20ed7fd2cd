//! Entity repository
//!
//! CRUD façade over the key-value adapter, the codec, and the index scheme.
//! The one rule every create path follows: write the entity first, then
//! register its key in the owning index(es) within the same call. The index
//! lists are the only enumeration mechanism; an entity written without its
//! index append can never be found again by a list query.
//!
//! Index semantics, preserved exactly from the stored-state contract:
//! per-type ID lists are append-only and duplicate-tolerant; the master key
//! list skips a single-key append whose key is already present, but batch
//! appends are taken as-is.

use crate::{
    codec,
    error::Result,
    registry::IndexScheme,
    store::KvStore,
    types::{
        BusinessPlan, Company, CompanyId, CompanyType, Contract, ContractKind, FlowMeterReading,
        Incident, Invoice, User,
    },
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Entity repository over an opaque key-value store
pub struct Repository {
    store: Arc<dyn KvStore>,
    scheme: IndexScheme,
}

impl Repository {
    /// Create a repository over a store with the given index scheme
    pub fn new(store: Arc<dyn KvStore>, scheme: IndexScheme) -> Self {
        Self { store, scheme }
    }

    /// The index scheme in effect
    pub fn scheme(&self) -> &IndexScheme {
        &self.scheme
    }

    // Raw access

    /// Fetch raw stored bytes
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key)
    }

    /// Fetch and decode an entity; absence is `Ok(None)`, not an error
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(codec::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Encode and store an entity at `key`. This is a bare write: creates
    /// go through the typed helpers below so the index append cannot be
    /// forgotten; updates of already-indexed entities use this directly.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.store.put(key, &codec::encode(value)?)
    }

    /// Remove a single key
    pub fn delete(&self, key: &str) -> Result<()> {
        self.store.delete(key)
    }

    // Index lists

    /// The ordered ID list stored under `index_key`; absent list is empty.
    /// Enumeration order is insertion order, never re-sorted.
    pub fn list(&self, index_key: &str) -> Result<Vec<String>> {
        match self.store.get(index_key)? {
            Some(bytes) => codec::decode(&bytes),
            None => Ok(Vec::new()),
        }
    }

    /// Append an ID to a per-type list. Duplicate-tolerant: appending the
    /// same ID twice stores it twice.
    pub fn append_to_index(&self, index_key: &str, id: &str) -> Result<()> {
        let mut ids = self.list(index_key)?;
        ids.push(id.to_string());
        self.put(index_key, &ids)
    }

    /// Register keys in the master list. A single key already present is
    /// skipped; batches are appended without deduplication.
    pub fn register_keys(&self, keys: &[String]) -> Result<()> {
        let mut master = self.list(&self.scheme.master_list)?;

        if keys.len() == 1 && master.contains(&keys[0]) {
            return Ok(());
        }

        master.extend_from_slice(keys);
        self.put(&self.scheme.master_list, &master)
    }

    /// Every key ever registered
    pub fn master_keys(&self) -> Result<Vec<String>> {
        self.list(&self.scheme.master_list)
    }

    // Typed creates: entity write, then index registration

    /// Store a company and index it
    pub fn create_company(&self, company: &Company) -> Result<()> {
        self.put(company.id.as_str(), company)?;
        self.append_to_index(&self.scheme.company_list, company.id.as_str())?;
        self.register_keys(&[company.id.to_string()])?;

        tracing::debug!(company_id = %company.id, "Company stored");
        Ok(())
    }

    /// Store a user and index it under its company type's user list
    pub fn create_user(&self, user: &User, company_type: CompanyType) -> Result<()> {
        self.put(&user.username, user)?;
        self.append_to_index(&self.scheme.user_list(company_type), &user.username)?;
        self.register_keys(&[user.username.clone()])?;

        tracing::debug!(username = %user.username, company_id = %user.company_id, "User stored");
        Ok(())
    }

    /// Store a business plan. Only initial creation appends to the plan
    /// list; updates rewrite the plan record in place.
    pub fn create_plan(&self, plan: &BusinessPlan, index: bool) -> Result<()> {
        self.put(&plan.id, plan)?;
        if index {
            self.append_to_index(&self.scheme.plan_list, &plan.id)?;
            self.register_keys(&[plan.id.clone()])?;
        }

        tracing::debug!(plan_id = %plan.id, "Business plan stored");
        Ok(())
    }

    /// Store a contract, index it under its kind, and pre-register the
    /// invoice/incident list keys so later lookups never hit an
    /// unregistered key.
    pub fn create_contract(&self, kind: ContractKind, contract: &Contract) -> Result<()> {
        let key = contract.key();
        self.put(&key, contract)?;
        self.append_to_index(self.scheme.contract_list(kind), &key)?;
        self.register_keys(&[
            key.clone(),
            self.scheme.invoice_list(&key),
            self.scheme.incident_list(&key),
        ])?;

        tracing::debug!(contract_id = contract.id, ?kind, "Contract stored");
        Ok(())
    }

    /// Store an invoice and append it to its contract's invoice list
    pub fn create_invoice(&self, invoice: &Invoice) -> Result<()> {
        let key = invoice.id.to_string();
        self.put(&key, invoice)?;
        self.register_keys(&[key.clone()])?;
        self.append_to_index(&self.scheme.invoice_list(invoice.contract_id), &key)?;

        tracing::debug!(invoice_id = invoice.id, contract_id = invoice.contract_id, "Invoice stored");
        Ok(())
    }

    /// Store an incident and append it to its contract's incident list
    pub fn create_incident(&self, incident: &Incident) -> Result<()> {
        let key = incident.id.to_string();
        self.put(&key, incident)?;
        self.register_keys(&[key.clone()])?;
        self.append_to_index(&self.scheme.incident_list(incident.contract_id), &key)?;

        tracing::debug!(
            incident_id = incident.id,
            contract_id = incident.contract_id,
            "Incident stored"
        );
        Ok(())
    }

    /// Append a whole reading to its company's telemetry list. Readings
    /// are never individually keyed.
    pub fn append_reading(&self, reading: &FlowMeterReading) -> Result<()> {
        let key = self.scheme.iot_data(&reading.company_id);
        let mut readings = self.readings(&reading.company_id)?;
        readings.push(reading.clone());
        self.put(&key, &readings)
    }

    /// All readings reported by a company, oldest first
    pub fn readings(&self, company_id: &CompanyId) -> Result<Vec<FlowMeterReading>> {
        let key = self.scheme.iot_data(company_id);
        match self.store.get(&key)? {
            Some(bytes) => codec::decode(&bytes),
            None => Ok(Vec::new()),
        }
    }
}
