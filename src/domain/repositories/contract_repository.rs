use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::StorageResult;
use crate::domain::contract::Contract;

/// Repository trait for Contract aggregate
#[async_trait]
pub trait ContractRepository: Send + Sync {
    async fn create(&self, contract: &Contract) -> StorageResult<()>;

    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Contract>>;

    /// All contracts of a user, oldest start date first
    async fn find_by_user(&self, user_id: Uuid) -> StorageResult<Vec<Contract>>;

    async fn update(&self, contract: &Contract) -> StorageResult<()>;

    async fn delete(&self, id: Uuid) -> StorageResult<()>;

    async fn count(&self) -> StorageResult<i64>;

    /// Sum of the salaries of every stored contract
    async fn sum_salaries(&self) -> StorageResult<Decimal>;
}
