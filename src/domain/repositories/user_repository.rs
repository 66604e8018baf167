use async_trait::async_trait;
use uuid::Uuid;

use super::StorageResult;
use crate::domain::user::User;

/// Repository trait for User aggregate
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; a taken email is a `UniqueViolation`
    async fn create(&self, user: &User) -> StorageResult<()>;

    /// Insert all users in one transaction: either every row lands or none
    async fn create_batch(&self, users: &[User]) -> StorageResult<()>;

    /// Insert the first users of a company
    ///
    /// The emptiness check and the inserts are one atomic step, so two
    /// concurrent callers cannot both succeed. Returns `false`, writing
    /// nothing, when the company already has users; a missing company is
    /// `NoRowsAffected`.
    async fn create_if_company_empty(
        &self,
        company_id: Uuid,
        users: &[User],
    ) -> StorageResult<bool>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<User>>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>>;

    /// Find all users for a company
    async fn find_by_company(&self, company_id: Uuid) -> StorageResult<Vec<User>>;

    /// Persist name, email and role of an existing user
    async fn update(&self, user: &User) -> StorageResult<()>;

    /// Delete a user together with their contracts and vacations
    async fn delete(&self, id: Uuid) -> StorageResult<()>;

    /// Number of users across all companies
    async fn count(&self) -> StorageResult<i64>;

    /// Number of users in one company
    async fn count_by_company(&self, company_id: Uuid) -> StorageResult<i64>;
}
