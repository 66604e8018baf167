use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::auth::access::{require_role, Caller};
use crate::domain::errors::DomainResult;
use crate::domain::repositories::{CompanyRepository, ContractRepository, UserRepository};
use crate::domain::user::Role;

/// Aggregate counts shown on the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_companies: i64,
    pub total_contracts: i64,
    pub total_salary: Decimal,
}

pub struct DashboardService {
    users: Arc<dyn UserRepository>,
    companies: Arc<dyn CompanyRepository>,
    contracts: Arc<dyn ContractRepository>,
}

impl DashboardService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        companies: Arc<dyn CompanyRepository>,
        contracts: Arc<dyn ContractRepository>,
    ) -> Self {
        Self {
            users,
            companies,
            contracts,
        }
    }

    pub async fn stats(&self, caller: &Caller) -> DomainResult<DashboardStats> {
        require_role(caller, Role::Admin)?;

        let (total_users, total_companies, total_contracts, total_salary) = tokio::try_join!(
            self.users.count(),
            self.companies.count(),
            self.contracts.count(),
            self.contracts.sum_salaries(),
        )?;

        Ok(DashboardStats {
            total_users,
            total_companies,
            total_contracts,
            total_salary,
        })
    }
}
