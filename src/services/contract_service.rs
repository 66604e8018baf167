use std::sync::Arc;

use uuid::Uuid;

use crate::auth::access::{require_role, require_self_or_admin, Caller};
use crate::domain::contract::{Contract, ContractTerms};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::{ContractRepository, UserRepository};
use crate::domain::user::Role;

pub struct ContractService {
    contracts: Arc<dyn ContractRepository>,
    users: Arc<dyn UserRepository>,
}

impl ContractService {
    pub fn new(contracts: Arc<dyn ContractRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { contracts, users }
    }

    pub async fn create(
        &self,
        caller: &Caller,
        user_id: Uuid,
        terms: ContractTerms,
    ) -> DomainResult<Contract> {
        require_role(caller, Role::Admin)?;
        self.require_user(user_id).await?;

        let contract = Contract::new(user_id, terms)?;
        self.contracts.create(&contract).await?;

        tracing::info!(contract_id = %contract.id(), user_id = %user_id, "contract created");
        Ok(contract)
    }

    /// Readable by admins and by the contract holder
    pub async fn get(&self, caller: &Caller, id: Uuid) -> DomainResult<Contract> {
        let contract = self.find(id).await?;
        require_self_or_admin(caller, contract.user_id())?;
        Ok(contract)
    }

    pub async fn list_by_user(&self, caller: &Caller, user_id: Uuid) -> DomainResult<Vec<Contract>> {
        require_self_or_admin(caller, user_id)?;
        self.require_user(user_id).await?;
        Ok(self.contracts.find_by_user(user_id).await?)
    }

    /// Replaces the terms of a contract, validated as on creation
    pub async fn update(
        &self,
        caller: &Caller,
        id: Uuid,
        terms: ContractTerms,
    ) -> DomainResult<Contract> {
        require_role(caller, Role::Admin)?;

        let mut contract = self.find(id).await?;
        contract.update(terms)?;
        self.contracts.update(&contract).await?;

        tracing::info!(contract_id = %id, "contract updated");
        Ok(contract)
    }

    pub async fn delete(&self, caller: &Caller, id: Uuid) -> DomainResult<()> {
        require_role(caller, Role::Admin)?;
        self.contracts.delete(id).await?;

        tracing::info!(contract_id = %id, "contract deleted");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> DomainResult<Contract> {
        self.contracts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    async fn require_user(&self, user_id: Uuid) -> DomainResult<()> {
        match self.users.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound),
        }
    }
}
