//! Index key scheme
//!
//! Every enumeration in the engine walks an ID list stored under a fixed
//! key. The scheme gathers those key names and affixes into one value that
//! is built once (usually from [`Config`](crate::Config)) and passed to the
//! repository, rather than living as process-wide constants.

use crate::types::{CompanyId, CompanyType, ContractKind};
use serde::{Deserialize, Serialize};

/// Fixed names of the ID-list keys and derived-key affixes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexScheme {
    /// List of every company ID
    pub company_list: String,

    /// List of trade-request contract IDs
    pub trade_request_list: String,

    /// List of transport-request contract IDs
    pub transport_request_list: String,

    /// List of gas-request contract IDs
    pub gas_request_list: String,

    /// List of business-plan IDs
    pub plan_list: String,

    /// Master list of every key ever registered; drives full reset
    pub master_list: String,

    /// `<type>{affix}`: usernames per company type
    pub user_list_affix: String,

    /// `<company>{affix}`: a company's business plan key
    pub plan_affix: String,

    /// `<company>{affix}`: a company's telemetry list
    pub iot_affix: String,

    /// `<contract>{affix}`: a contract's invoice ID list
    pub invoice_affix: String,

    /// `<contract>{affix}`: a contract's incident ID list
    pub incident_affix: String,
}

impl Default for IndexScheme {
    fn default() -> Self {
        Self {
            company_list: "COMPANYIDLIST".to_string(),
            trade_request_list: "TRADEREQUESTIDLIST".to_string(),
            transport_request_list: "TRANSPORTREQUESTIDLIST".to_string(),
            gas_request_list: "GASREQUESTIDLIST".to_string(),
            plan_list: "PLANIDLIST".to_string(),
            master_list: "ALLKEYS".to_string(),
            user_list_affix: "_USERLIST".to_string(),
            plan_affix: "_PLAN".to_string(),
            iot_affix: "_IOTDATA".to_string(),
            invoice_affix: "_INVOICELIST".to_string(),
            incident_affix: "_INCIDENTLIST".to_string(),
        }
    }
}

impl IndexScheme {
    /// Contract ID list for a contract kind
    pub fn contract_list(&self, kind: ContractKind) -> &str {
        match kind {
            ContractKind::Trade => &self.trade_request_list,
            ContractKind::Transport => &self.transport_request_list,
            ContractKind::Gas => &self.gas_request_list,
        }
    }

    /// Username list for a company type (lowercased type + affix)
    pub fn user_list(&self, company_type: CompanyType) -> String {
        format!(
            "{}{}",
            company_type.as_str().to_ascii_lowercase(),
            self.user_list_affix
        )
    }

    /// Business-plan key for a company
    pub fn plan_key(&self, company_id: &CompanyId) -> String {
        format!("{}{}", company_id, self.plan_affix)
    }

    /// Telemetry list key for a company
    pub fn iot_data(&self, company_id: &CompanyId) -> String {
        format!("{}{}", company_id, self.iot_affix)
    }

    /// Invoice ID list key for a contract
    pub fn invoice_list(&self, contract_id: impl std::fmt::Display) -> String {
        format!("{}{}", contract_id, self.invoice_affix)
    }

    /// Incident ID list key for a contract
    pub fn incident_list(&self, contract_id: impl std::fmt::Display) -> String {
        format!("{}{}", contract_id, self.incident_affix)
    }
}
