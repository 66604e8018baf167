use async_trait::async_trait;
use uuid::Uuid;

use super::StorageResult;
use crate::domain::company::Company;

/// Repository trait for Company aggregate
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Insert a new company; a taken tax id is a `UniqueViolation`
    async fn create(&self, company: &Company) -> StorageResult<()>;

    /// Find a company by its ID
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Company>>;

    /// Find a company by its tax id
    async fn find_by_tax_id(&self, tax_id: &str) -> StorageResult<Option<Company>>;

    /// Persist name and tax id of an existing company
    async fn update(&self, company: &Company) -> StorageResult<()>;

    /// Delete a company together with its users and their records
    async fn delete(&self, id: Uuid) -> StorageResult<()>;

    /// Number of registered companies
    async fn count(&self) -> StorageResult<i64>;
}
