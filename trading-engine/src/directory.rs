//! Company, user, and business-plan operations
//!
//! Registration indexes the new user under its company type's user list;
//! every later mutation (password change, balance top-up, plan update)
//! rewrites the record in place without touching any index.

use crate::{engine::TradingEngine, error::Error, types::{BusinessPlanInfo, UserInfo}, Result};
use ledger_state::{BusinessPlan, Company, CompanyId, CompanyType, User};
use rust_decimal::Decimal;

impl TradingEngine {
    /// Register a user for an existing company
    pub fn register(&self, username: &str, password: &str, company: &Company) -> Result<()> {
        let user = User {
            username: username.to_string(),
            password: password.to_string(),
            company_id: company.id.clone(),
        };
        self.repo.create_user(&user, company.company_type)?;

        tracing::info!(username, company_id = %company.id, "User registered");
        Ok(())
    }

    /// Check credentials; the password is an opaque secret compared verbatim
    pub fn verify_user(&self, username: &str, password: &str) -> Result<User> {
        let user: User = self
            .repo
            .get(username)?
            .ok_or_else(|| Error::Unauthorized(format!("unknown user {}", username)))?;

        if user.password != password {
            return Err(Error::Unauthorized(format!(
                "password mismatch for {}",
                username
            )));
        }

        Ok(user)
    }

    /// A user joined with its company and, for planning roles, the plan.
    /// The plan is an optional lookup: a Buyer has none and that is not
    /// an error.
    pub fn user_info(&self, username: &str, company_id: &CompanyId) -> Result<UserInfo> {
        let company: Company = self
            .repo
            .get(company_id.as_str())?
            .ok_or_else(|| Error::NotFound(format!("company {}", company_id)))?;

        let business_plan = if company.company_type.has_business_plan() {
            self.repo.get(&self.repo.scheme().plan_key(company_id))?
        } else {
            None
        };

        Ok(UserInfo {
            username: username.to_string(),
            company,
            business_plan,
        })
    }

    /// Verify credentials and return the joined user view
    pub fn validate_user(&self, username: &str, password: &str) -> Result<UserInfo> {
        let user = self.verify_user(username, password)?;
        self.user_info(username, &user.company_id)
    }

    /// Replace a user's password after verifying the old one
    pub fn change_password(&self, username: &str, old: &str, new: &str) -> Result<()> {
        let user = self.verify_user(username, old)?;
        let updated = User {
            password: new.to_string(),
            ..user
        };
        self.repo.put(username, &updated)?;

        tracing::info!(username, "Password changed");
        Ok(())
    }

    /// Add to a company's bank balance and stamp the balance date
    pub fn topup_balance(
        &self,
        company_id: &CompanyId,
        amount: Decimal,
        date_ms: i64,
    ) -> Result<Company> {
        let mut company: Company = self
            .repo
            .get(company_id.as_str())?
            .ok_or_else(|| Error::NotFound(format!("company {}", company_id)))?;

        company.bank_balance += amount;
        company.balance_date_ms = date_ms;
        self.repo.put(company_id.as_str(), &company)?;

        tracing::info!(company_id = %company_id, %amount, "Balance topped up");
        Ok(company)
    }

    /// Companies filtered by type, or all of them for the filter `all`
    /// (case-insensitive). An unknown type filter matches nothing.
    pub fn company_list(&self, filter: &str) -> Result<Vec<Company>> {
        let all = filter.eq_ignore_ascii_case("all");
        let wanted = CompanyType::parse(filter);

        let mut companies = Vec::new();
        for key in self.repo.list(&self.repo.scheme().company_list)? {
            let Some(company) = self.repo.get::<Company>(&key)? else {
                continue;
            };
            if all || wanted == Some(company.company_type) {
                companies.push(company);
            }
        }

        Ok(companies)
    }

    /// Rewrite a company's declared plan. Updates never re-index: the plan
    /// key stays in the plan list from its initial creation.
    pub fn update_business_plan(&self, plan: &BusinessPlan) -> Result<()> {
        self.repo.create_plan(plan, false)?;

        tracing::info!(plan_id = %plan.id, gas_price = %plan.gas_price, "Business plan updated");
        Ok(())
    }

    /// Every declared plan joined with its owning company
    pub fn business_plan_list(&self) -> Result<Vec<BusinessPlanInfo>> {
        let mut plans = Vec::new();
        for key in self.repo.list(&self.repo.scheme().plan_list)? {
            let Some(business_plan) = self.repo.get::<BusinessPlan>(&key)? else {
                continue;
            };
            let company: Company = self
                .repo
                .get(business_plan.company_id.as_str())?
                .ok_or_else(|| {
                    Error::NotFound(format!("company {}", business_plan.company_id))
                })?;

            plans.push(BusinessPlanInfo {
                business_plan,
                company,
            });
        }

        Ok(plans)
    }
}
