use std::sync::Arc;

use uuid::Uuid;

use crate::auth::access::{require_role, Caller};
use crate::domain::company::Company;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::CompanyRepository;
use crate::domain::user::Role;

/// Name and tax id of a company, as submitted
#[derive(Debug, Clone)]
pub struct CompanyInput {
    pub name: String,
    pub tax_id: String,
}

pub struct CompanyService {
    companies: Arc<dyn CompanyRepository>,
}

impl CompanyService {
    pub fn new(companies: Arc<dyn CompanyRepository>) -> Self {
        Self { companies }
    }

    /// Registers a company; open to unauthenticated callers
    pub async fn create(&self, input: CompanyInput) -> DomainResult<Company> {
        let company = Company::new(input.name, input.tax_id)?;
        self.companies.create(&company).await?;

        tracing::info!(company_id = %company.id(), "company registered");
        Ok(company)
    }

    /// Any authenticated caller may read a company
    pub async fn get(&self, _caller: &Caller, id: Uuid) -> DomainResult<Company> {
        self.companies
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    pub async fn update(
        &self,
        caller: &Caller,
        id: Uuid,
        input: CompanyInput,
    ) -> DomainResult<Company> {
        require_role(caller, Role::Admin)?;

        let mut company = self
            .companies
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)?;
        company.update(input.name, input.tax_id)?;
        self.companies.update(&company).await?;

        tracing::info!(company_id = %id, "company updated");
        Ok(company)
    }

    /// Deletes a company together with its users and their records
    pub async fn delete(&self, caller: &Caller, id: Uuid) -> DomainResult<()> {
        require_role(caller, Role::Admin)?;
        self.companies.delete(id).await?;

        tracing::info!(company_id = %id, "company deleted");
        Ok(())
    }
}
