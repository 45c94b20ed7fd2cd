//! Read-model types and the response envelope
//!
//! The `*Info` structs are read-time joins assembled per query; nothing
//! here is stored. The envelope is the wire shape existing callers consume;
//! internal components never pass it around.

use ledger_state::{BusinessPlan, Company, Contract, Incident, Invoice};
use serde::{Deserialize, Serialize};

/// A user joined with its company and, where the role declares one, the
/// company's business plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// Username
    #[serde(rename = "user_id")]
    pub username: String,

    /// Owning company record
    pub company: Company,

    /// The company's plan; absent for buyers
    pub business_plan: Option<BusinessPlan>,
}

/// A business plan joined with its owning company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessPlanInfo {
    /// The plan
    pub business_plan: BusinessPlan,

    /// Its owner
    pub company: Company,
}

/// A contract enriched with both parties, the pricing plan, and its
/// invoice/incident history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractInfo {
    /// The contract itself
    pub contract: Contract,

    /// Initiating party's current record
    pub initiator_company: Company,

    /// Receiving party's current record
    pub receiver_company: Company,

    /// The receiver's plan, which prices this contract; a Buyer receiver
    /// has none
    pub business_plan: Option<BusinessPlan>,

    /// Invoices raised against this contract
    pub invoice_list: Vec<Invoice>,

    /// Incidents raised against this contract
    pub incident_list: Vec<Incident>,
}

/// Response status discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    /// Operation succeeded
    #[serde(rename = "SUCCESS")]
    Success,
    /// Operation failed in a way the caller should present to a user
    #[serde(rename = "FAIL")]
    Fail,
}

/// The response envelope produced only at the dispatch boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// `SUCCESS` or `FAIL`
    #[serde(rename = "statusCode")]
    pub status_code: StatusCode,

    /// Operation-specific payload, or a message on failure
    pub body: serde_json::Value,
}

impl Envelope {
    /// Successful response wrapping a serializable body
    pub fn success<T: Serialize>(body: &T) -> crate::Result<Self> {
        let body = serde_json::to_value(body)
            .map_err(|e| crate::Error::InvalidArgument(format!("unserializable body: {}", e)))?;
        Ok(Self {
            status_code: StatusCode::Success,
            body,
        })
    }

    /// Successful response with no payload
    pub fn success_empty() -> Self {
        Self {
            status_code: StatusCode::Success,
            body: serde_json::Value::Null,
        }
    }

    /// Failure response carrying a user-presentable message
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::Fail,
            body: serde_json::Value::String(message.into()),
        }
    }

    /// Whether this is a success envelope
    pub fn is_success(&self) -> bool {
        self.status_code == StatusCode::Success
    }
}
