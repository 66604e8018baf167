// Repository ports (interfaces implemented by infrastructure adapters)

pub mod company_repository;
pub mod contract_repository;
pub mod user_repository;
pub mod vacation_repository;

pub use company_repository::CompanyRepository;
pub use contract_repository::ContractRepository;
pub use user_repository::UserRepository;
pub use vacation_repository::VacationRepository;

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Failure reported by a storage adapter
///
/// Adapters must keep the first two conditions distinguishable from any
/// other backend failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// A unique constraint (email, tax id, ...) was violated
    #[error("unique constraint violated")]
    UniqueViolation,

    /// An update or delete matched no row
    #[error("no rows affected")]
    NoRowsAffected,

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UniqueViolation => DomainError::Duplicate,
            StorageError::NoRowsAffected => DomainError::NotFound,
            StorageError::Backend(detail) => DomainError::Internal(detail),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
