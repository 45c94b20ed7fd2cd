//! Entity types stored on the ledger
//!
//! All records serialize to JSON documents whose field names match the
//! documents existing callers already read back through the raw `read`
//! query, so the serde renames here are part of the storage contract.
//! Money and energy quantities are exact decimals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Company identifier (e.g. `PRODUCER1`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(String);

impl CompanyId {
    /// Create new company ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Market role of a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyType {
    /// Produces gas and answers trade requests
    Producer,
    /// Buys from producers, books transport, sells to buyers
    Shipper,
    /// Operates the grid and answers transport requests
    Transporter,
    /// End consumer, issues gas requests
    Buyer,
}

impl CompanyType {
    /// Canonical name as stored on the ledger
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::Producer => "Producer",
            CompanyType::Shipper => "Shipper",
            CompanyType::Transporter => "Transporter",
            CompanyType::Buyer => "Buyer",
        }
    }

    /// Parse from string, case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "producer" => Some(CompanyType::Producer),
            "shipper" => Some(CompanyType::Shipper),
            "transporter" => Some(CompanyType::Transporter),
            "buyer" => Some(CompanyType::Buyer),
            _ => None,
        }
    }

    /// Whether companies of this type declare a business plan
    pub fn has_business_plan(&self) -> bool {
        matches!(
            self,
            CompanyType::Producer | CompanyType::Transporter | CompanyType::Shipper
        )
    }

    /// The contract index a company of this type reports telemetry against.
    /// Shippers meter nothing themselves, so they map to no index.
    pub fn contract_kind(&self) -> Option<ContractKind> {
        match self {
            CompanyType::Producer => Some(ContractKind::Trade),
            CompanyType::Transporter => Some(ContractKind::Transport),
            CompanyType::Buyer => Some(ContractKind::Gas),
            CompanyType::Shipper => None,
        }
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of bilateral contract, selecting its ID index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractKind {
    /// Shipper buys energy from a producer
    Trade,
    /// Shipper books grid capacity from a transporter
    Transport,
    /// Buyer requests gas from a shipper
    Gas,
}

/// Contract lifecycle states (closed set; transitions are caller-driven)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    /// Created, awaiting counterparty decision
    New,
    /// Counterparty accepted; telemetry reconciles against it
    Accepted,
    /// Counterparty rejected
    Rejected,
    /// Fulfilled and closed out
    Completed,
}

impl ContractStatus {
    /// Parse from the ledger's stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "New" => Some(ContractStatus::New),
            "Accepted" => Some(ContractStatus::Accepted),
            "Rejected" => Some(ContractStatus::Rejected),
            "Completed" => Some(ContractStatus::Completed),
            _ => None,
        }
    }
}

/// Invoice payment states; the only transition is Pending → Paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Awaiting settlement
    Pending,
    /// Settled
    Paid,
}

/// Incident states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncidentStatus {
    /// Raised, unresolved
    New,
}

/// A trading party with a ledger bank account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Company ID, also the entity key
    #[serde(rename = "company_id")]
    pub id: CompanyId,

    /// Market role; immutable once created
    pub company_type: CompanyType,

    /// Display name
    #[serde(rename = "company_name")]
    pub name: String,

    /// Location
    #[serde(rename = "company_location")]
    pub location: String,

    /// Bank balance, mutated only by top-ups and settlement
    pub bank_balance: Decimal,

    /// When the balance last changed (ms since epoch)
    #[serde(rename = "bank_balance_date_ms")]
    pub balance_date_ms: i64,
}

/// A login record; the username is the entity key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Username
    #[serde(rename = "user_id")]
    pub username: String,

    /// Opaque secret, compared verbatim
    #[serde(rename = "user_password")]
    pub password: String,

    /// Owning company
    pub company_id: CompanyId,
}

/// A company's declared gas price and entry/exit capacities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessPlan {
    /// Plan ID, derived from the company ID
    #[serde(rename = "bp_plan_id")]
    pub id: String,

    /// Declaration date (`d/m/yyyy`)
    #[serde(rename = "bp_plan_date")]
    pub date: String,

    /// Gas price per MWh, used to price settlements
    #[serde(rename = "bp_gas_price")]
    pub gas_price: Decimal,

    /// Grid entry point
    #[serde(rename = "bp_entry_location")]
    pub entry_location: String,

    /// Entry capacity
    #[serde(rename = "bp_entry_capacity")]
    pub entry_capacity: i64,

    /// Grid exit point
    #[serde(rename = "bp_exit_location")]
    pub exit_location: String,

    /// Exit capacity
    #[serde(rename = "bp_exit_capacity")]
    pub exit_capacity: i64,

    /// Owning company
    #[serde(rename = "bp_company_id")]
    pub company_id: CompanyId,
}

/// A bilateral agreement for a quantity of energy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Numeric contract ID; the entity key is its decimal string form
    #[serde(rename = "contract_id")]
    pub id: i64,

    /// Initiating company
    #[serde(rename = "contract_initiator_id")]
    pub initiator_id: CompanyId,

    /// Receiving company; never equal to the initiator
    #[serde(rename = "contract_receiver_id")]
    pub receiver_id: CompanyId,

    /// Contracted energy (MWh)
    #[serde(rename = "contract_energy_mwh")]
    pub energy_mwh: Decimal,

    /// Grid entry location
    #[serde(rename = "contract_entry_location")]
    pub entry_location: String,

    /// Delivery window start
    #[serde(rename = "contract_start_date")]
    pub start_date: String,

    /// Delivery window end
    #[serde(rename = "contract_end_date")]
    pub end_date: String,

    /// Lifecycle state
    #[serde(rename = "contract_status")]
    pub status: ContractStatus,
}

impl Contract {
    /// The entity key for this contract
    pub fn key(&self) -> String {
        self.id.to_string()
    }

    /// Whether the given company is a party to this contract
    pub fn involves(&self, company_id: &CompanyId) -> bool {
        &self.initiator_id == company_id || &self.receiver_id == company_id
    }
}

/// A flow-meter report of delivered energy. Stored whole inside the
/// reporting company's telemetry list, never under its own key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowMeterReading {
    /// Metering device
    pub device_id: String,

    /// Device location
    pub device_location: String,

    /// Reporting company
    pub company_id: CompanyId,

    /// Line pressure (kPa), stored as received
    pub pressure_kpa: i64,

    /// Gas temperature (°C), stored as received
    pub temperature_c: i64,

    /// Specific gravity, stored as received
    pub specific_gravity: f64,

    /// Energy delivered (MWh)
    pub energy_mwh: Decimal,

    /// Reading timestamp (ms since epoch)
    pub timestamp_ms: i64,
}

/// An invoice emitted when telemetry meets a contract's energy amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice ID, derived from the reading timestamp
    #[serde(rename = "invoice_id")]
    pub id: i64,

    /// Issue date (ms since epoch)
    pub invoice_date_ms: i64,

    /// Pending until settled
    pub payment_status: PaymentStatus,

    /// Settlement date (ms since epoch); 0 while pending
    pub payment_date_ms: i64,

    /// Contract being invoiced
    pub contract_id: i64,
}

/// An incident raised when telemetry falls short of a contract's energy amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Incident ID, derived from the reading timestamp
    #[serde(rename = "incident_id")]
    pub id: i64,

    /// Raise date (ms since epoch)
    pub incident_date_ms: i64,

    /// Always `New`
    pub incident_status: IncidentStatus,

    /// Energy the contract promised (MWh)
    pub expected_energy_mwh: Decimal,

    /// Energy the meter reported (MWh)
    pub actual_energy_mwh: Decimal,

    /// Contract the shortfall is against
    pub contract_id: i64,
}
