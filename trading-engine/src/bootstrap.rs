//! Bootstrap and reset
//!
//! Seeds the demo marketplace: nine companies with funded accounts, a login
//! per company, and a declared plan for every planning role. Reset walks the
//! master key list, deletes everything it names, drops the master list
//! itself, and re-seeds. Deleting the master list before re-init is what
//! keeps stale index references from resurfacing and makes reset idempotent.

use crate::{engine::TradingEngine, Result};
use chrono::{Datelike, Utc};
use ledger_state::{BusinessPlan, Company, CompanyId, CompanyType, User};
use rust_decimal::Decimal;

/// Default opening balance for every seeded company
const OPENING_BALANCE: i64 = 100_000;

// (id, type, name) for the seeded companies
const DEFAULT_COMPANIES: &[(&str, CompanyType, &str)] = &[
    ("BUYER1", CompanyType::Buyer, "EnBW"),
    ("BUYER2", CompanyType::Buyer, "Vattenfall"),
    ("SHIPPER1", CompanyType::Shipper, "RWE Supply and Trading"),
    ("SHIPPER2", CompanyType::Shipper, "UNIPER Energy Trading"),
    ("PRODUCER1", CompanyType::Producer, "Dong Energy"),
    ("PRODUCER2", CompanyType::Producer, "Gaz Promp"),
    ("TRANSPORTER1", CompanyType::Transporter, "Open Grid Europe"),
    ("TRANSPORTER2", CompanyType::Transporter, "ONTRAS GMBH"),
    ("TRANSPORTER3", CompanyType::Transporter, "Gasunie DTS"),
];

// (company, gas price, entry location, entry cap, exit location, exit cap)
const DEFAULT_PLANS: &[(&str, i64, &str, i64, &str, i64)] = &[
    ("SHIPPER1", 14, "Europe", 0, "Bunder-Tief, Steinbrink", 0),
    ("SHIPPER2", 15, "Steinitz", 0, "Steinitz", 0),
    ("PRODUCER1", 12, "Wardenburg", 200, "Wardenburg", 200),
    ("PRODUCER2", 10, "Ellund", 300, "Ellund", 300),
    ("TRANSPORTER1", 11, "Wardenburg", 200, "Bunder-Tief", 100),
    ("TRANSPORTER2", 9, "Ellund", 300, "Steinbrink", 150),
    ("TRANSPORTER3", 8, "Ellund", 350, "Steinitz", 175),
];

// Companies whose meters report telemetry; shippers meter nothing
const METERED_COMPANIES: &[&str] = &[
    "BUYER1",
    "BUYER2",
    "PRODUCER1",
    "PRODUCER2",
    "TRANSPORTER1",
    "TRANSPORTER2",
    "TRANSPORTER3",
];

impl TradingEngine {
    /// Seed default companies, users, and business plans
    pub fn bootstrap(&self) -> Result<()> {
        tracing::info!("Bootstrapping default marketplace state");

        let scheme = self.repo.scheme().clone();

        // Register the bare index keys first so reset can find and clear
        // lists that exist before any entity does.
        let mut base_keys = vec![
            scheme.company_list.clone(),
            scheme.trade_request_list.clone(),
            scheme.transport_request_list.clone(),
            scheme.gas_request_list.clone(),
            scheme.plan_list.clone(),
            scheme.user_list(CompanyType::Buyer),
            scheme.user_list(CompanyType::Shipper),
            scheme.user_list(CompanyType::Producer),
            scheme.user_list(CompanyType::Transporter),
        ];
        for company in METERED_COMPANIES {
            base_keys.push(scheme.iot_data(&CompanyId::new(*company)));
        }
        self.repo.register_keys(&base_keys)?;

        for (id, company_type, name) in DEFAULT_COMPANIES {
            self.repo.create_company(&Company {
                id: CompanyId::new(*id),
                company_type: *company_type,
                name: name.to_string(),
                location: "Europe".to_string(),
                bank_balance: Decimal::from(OPENING_BALANCE),
                balance_date_ms: 0,
            })?;

            // One login per company: lowercase company ID as both username
            // and starting password.
            let username = id.to_ascii_lowercase();
            self.repo.create_user(
                &User {
                    username: username.clone(),
                    password: username,
                    company_id: CompanyId::new(*id),
                },
                *company_type,
            )?;
        }

        let today = Utc::now();
        let plan_date = format!("{}/{}/{}", today.day(), today.month(), today.year());

        for (company, gas_price, entry_location, entry_capacity, exit_location, exit_capacity) in
            DEFAULT_PLANS
        {
            let company_id = CompanyId::new(*company);
            self.repo.create_plan(
                &BusinessPlan {
                    id: scheme.plan_key(&company_id),
                    date: plan_date.clone(),
                    gas_price: Decimal::from(*gas_price),
                    entry_location: entry_location.to_string(),
                    entry_capacity: *entry_capacity,
                    exit_location: exit_location.to_string(),
                    exit_capacity: *exit_capacity,
                    company_id,
                },
                true,
            )?;
        }

        tracing::info!(
            companies = DEFAULT_COMPANIES.len(),
            plans = DEFAULT_PLANS.len(),
            "Bootstrap complete"
        );
        Ok(())
    }

    /// Delete every registered key, drop the master list, and re-seed
    pub fn reset(&self) -> Result<()> {
        let keys = self.repo.master_keys()?;
        tracing::info!(keys = keys.len(), "Resetting ledger state");

        for key in &keys {
            self.repo.delete(key)?;
        }
        self.repo.delete(&self.repo.scheme().master_list)?;

        self.bootstrap()
    }
}
