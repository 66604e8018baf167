use async_trait::async_trait;
use uuid::Uuid;

use super::StorageResult;
use crate::domain::vacation::Vacation;

/// Repository trait for Vacation aggregate
#[async_trait]
pub trait VacationRepository: Send + Sync {
    async fn create(&self, vacation: &Vacation) -> StorageResult<()>;

    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Vacation>>;

    /// All vacations of a user, earliest start date first
    async fn find_by_user(&self, user_id: Uuid) -> StorageResult<Vec<Vacation>>;

    async fn update(&self, vacation: &Vacation) -> StorageResult<()>;

    async fn delete(&self, id: Uuid) -> StorageResult<()>;
}
