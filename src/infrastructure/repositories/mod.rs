// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod memory;
pub mod postgres_company_repository;
pub mod postgres_contract_repository;
pub mod postgres_user_repository;
pub mod postgres_vacation_repository;

pub use memory::InMemoryStore;
pub use postgres_company_repository::PostgresCompanyRepository;
pub use postgres_contract_repository::PostgresContractRepository;
pub use postgres_user_repository::PostgresUserRepository;
pub use postgres_vacation_repository::PostgresVacationRepository;

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::repositories::{
    CompanyRepository, ContractRepository, StorageError, UserRepository, VacationRepository,
};

const UNIQUE_VIOLATION: &str = "23505";

/// One adapter per repository port, shared by every service
#[derive(Clone)]
pub struct Repositories {
    pub companies: Arc<dyn CompanyRepository>,
    pub users: Arc<dyn UserRepository>,
    pub contracts: Arc<dyn ContractRepository>,
    pub vacations: Arc<dyn VacationRepository>,
}

impl Repositories {
    /// Postgres adapters over one connection pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            companies: Arc::new(PostgresCompanyRepository::new(pool.clone())),
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            contracts: Arc::new(PostgresContractRepository::new(pool.clone())),
            vacations: Arc::new(PostgresVacationRepository::new(pool)),
        }
    }

    /// Every port backed by one shared [`InMemoryStore`]
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            companies: store.clone(),
            users: store.clone(),
            contracts: store.clone(),
            vacations: store,
        }
    }
}

/// Maps a sqlx error to the storage condition the services understand
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StorageError {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            StorageError::UniqueViolation
        }
        sqlx::Error::Database(db_err) => StorageError::Backend(format!(
            "database error in {}: {}",
            operation,
            db_err.message()
        )),
        other => StorageError::Backend(format!("sqlx error in {}: {}", operation, other)),
    }
}

/// Turns a zero-row update or delete into `NoRowsAffected`
pub(crate) fn expect_affected(rows_affected: u64) -> Result<(), StorageError> {
    if rows_affected == 0 {
        Err(StorageError::NoRowsAffected)
    } else {
        Ok(())
    }
}
