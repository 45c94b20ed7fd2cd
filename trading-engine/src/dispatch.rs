//! Invoke/query dispatch
//!
//! The hosting ledger routes calls here as an operation name plus ordered
//! positional string arguments. Arity is checked before anything touches
//! the store. The `SUCCESS`/`FAIL` envelope exists only in this module;
//! everything beneath it exchanges typed values.
//!
//! Two outcomes cross the boundary as `FAIL` envelopes rather than errors,
//! because callers present them to users: a credential mismatch on
//! `validateUser`, and an insufficient-funds settlement on `makePayment`.

use crate::{
    engine::TradingEngine,
    error::Error,
    settlement::SettlementOutcome,
    types::{Envelope, StatusCode},
    Result,
};
use ledger_state::{BusinessPlan, Company, CompanyId, ContractKind, ContractStatus, FlowMeterReading};
use rust_decimal::Decimal;

fn require_args(operation: &str, args: &[String], expected: usize) -> Result<()> {
    if args.len() < expected {
        return Err(Error::ArgumentCount {
            operation: operation.to_string(),
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

fn parse_i64(field: &str, value: &str) -> Result<i64> {
    value
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{}: not an integer: {}", field, value)))
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal> {
    value
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{}: not a number: {}", field, value)))
}

fn parse_status(value: &str) -> Result<ContractStatus> {
    ContractStatus::parse(value)
        .ok_or_else(|| Error::InvalidArgument(format!("unknown contract status: {}", value)))
}

impl TradingEngine {
    /// Dispatch a state-mutating operation
    pub fn invoke(&self, operation: &str, args: &[String]) -> Result<Envelope> {
        self.metrics.invokes_total.inc();
        tracing::debug!(operation, argc = args.len(), "Invoke");

        match operation {
            "register" => {
                require_args(operation, args, 3)?;
                let company: Company = serde_json::from_str(&args[2]).map_err(|e| {
                    Error::InvalidArgument(format!("company payload: {}", e))
                })?;
                self.register(&args[0], &args[1], &company)?;
                Ok(Envelope::success_empty())
            }
            "createTradeRequest" => self.invoke_create_contract(ContractKind::Trade, args),
            "createTransportRequest" => self.invoke_create_contract(ContractKind::Transport, args),
            "createGasRequest" => self.invoke_create_contract(ContractKind::Gas, args),
            "updateContractStatus" => {
                require_args(operation, args, 2)?;
                self.update_contract_status(&args[0], parse_status(&args[1])?)?;
                Ok(Envelope::success_empty())
            }
            "updateBusinessPlan" => {
                require_args(operation, args, 8)?;
                let plan = BusinessPlan {
                    id: args[0].clone(),
                    date: args[1].clone(),
                    gas_price: parse_decimal("gas price", &args[2])?,
                    entry_location: args[3].clone(),
                    entry_capacity: parse_i64("entry capacity", &args[4])?,
                    exit_location: args[5].clone(),
                    exit_capacity: parse_i64("exit capacity", &args[6])?,
                    company_id: CompanyId::new(&args[7]),
                };
                self.update_business_plan(&plan)?;
                Ok(Envelope::success_empty())
            }
            "topupBankBalance" => {
                require_args(operation, args, 3)?;
                let amount = parse_decimal("top-up amount", &args[1])?;
                let date_ms = parse_i64("top-up date", &args[2])?;
                self.topup_balance(&CompanyId::new(&args[0]), amount, date_ms)?;
                Ok(Envelope::success_empty())
            }
            "addTelemetry" => {
                require_args(operation, args, 1)?;
                let reading: FlowMeterReading = serde_json::from_str(&args[0]).map_err(|e| {
                    Error::InvalidArgument(format!("reading payload: {}", e))
                })?;
                self.ingest(reading)?;
                Ok(Envelope::success_empty())
            }
            "makePayment" => {
                require_args(operation, args, 3)?;
                let now_ms = parse_i64("payment date", &args[2])?;
                match self.pay_invoice(&args[0], &args[1], now_ms)? {
                    SettlementOutcome::Settled { .. } => Ok(Envelope::success_empty()),
                    SettlementOutcome::InsufficientFunds { balance, required } => {
                        Ok(Envelope::fail(format!(
                            "Transaction FAILED: Insufficient funds (Bank Balance: {}, Invoice payment amount: {})",
                            balance, required
                        )))
                    }
                }
            }
            "changePassword" => {
                require_args(operation, args, 3)?;
                self.change_password(&args[0], &args[1], &args[2])?;
                Ok(Envelope::success_empty())
            }
            "reset" => {
                self.reset()?;
                Ok(Envelope::success_empty())
            }
            "delete" => {
                require_args(operation, args, 1)?;
                self.repo.delete(&args[0])?;
                Ok(Envelope::success_empty())
            }
            _ => Err(Error::UnknownOperation(operation.to_string())),
        }
    }

    /// Dispatch a read-only operation
    pub fn query(&self, operation: &str, args: &[String]) -> Result<Envelope> {
        self.metrics.queries_total.inc();
        tracing::debug!(operation, argc = args.len(), "Query");

        match operation {
            "read" => {
                require_args(operation, args, 1)?;
                let body = match self.repo.get_raw(&args[0])? {
                    Some(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                        serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
                    }),
                    None => serde_json::Value::Null,
                };
                Ok(Envelope {
                    status_code: StatusCode::Success,
                    body,
                })
            }
            "validateUser" => {
                require_args(operation, args, 2)?;
                match self.validate_user(&args[0], &args[1]) {
                    Ok(info) => Envelope::success(&info),
                    Err(Error::Unauthorized(_)) => Ok(Envelope::fail("ERROR: Invalid user !")),
                    Err(e) => Err(e),
                }
            }
            "getUserInfo" => {
                require_args(operation, args, 2)?;
                Envelope::success(&self.user_info(&args[0], &CompanyId::new(&args[1]))?)
            }
            "getCompanyList" => {
                require_args(operation, args, 1)?;
                Envelope::success(&self.company_list(&args[0])?)
            }
            "getTradeRequestList" => self.query_contract_list(ContractKind::Trade, args),
            "getTransportRequestList" => self.query_contract_list(ContractKind::Transport, args),
            "getGasRequestList" => self.query_contract_list(ContractKind::Gas, args),
            "getBusinessPlanList" => Envelope::success(&self.business_plan_list()?),
            "getIOTData" => {
                require_args(operation, args, 1)?;
                Envelope::success(&self.repo.readings(&CompanyId::new(&args[0]))?)
            }
            "getIOTDataForShipper" => {
                require_args(operation, args, 1)?;
                Envelope::success(&self.shipper_readings(&CompanyId::new(&args[0]))?)
            }
            "getInvoiceList" => {
                require_args(operation, args, 1)?;
                let contract_id = parse_i64("contract ID", &args[0])?;
                Envelope::success(&self.invoices_for(contract_id)?)
            }
            "getIncidentList" => {
                require_args(operation, args, 1)?;
                let contract_id = parse_i64("contract ID", &args[0])?;
                Envelope::success(&self.incidents_for(contract_id)?)
            }
            "getMasterKeyList" => Envelope::success(&self.repo.master_keys()?),
            _ => Err(Error::UnknownOperation(operation.to_string())),
        }
    }

    fn invoke_create_contract(&self, kind: ContractKind, args: &[String]) -> Result<Envelope> {
        require_args("createContract", args, 6)?;

        let id = parse_i64("contract ID", &args[0])?;
        let energy_mwh = parse_decimal("contract energy", &args[3])?;

        self.create_contract(
            kind,
            id,
            CompanyId::new(&args[1]),
            CompanyId::new(&args[2]),
            energy_mwh,
            &args[4],
            &args[5],
            args.get(6).map(String::as_str),
        )?;
        Ok(Envelope::success_empty())
    }

    fn query_contract_list(&self, kind: ContractKind, args: &[String]) -> Result<Envelope> {
        require_args("getContractList", args, 1)?;
        Envelope::success(&self.list_contracts(kind, &CompanyId::new(&args[0]))?)
    }
}
