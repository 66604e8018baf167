use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::{expect_affected, map_sqlx_error};
use crate::domain::contract::{Contract, ContractTerms, ContractType};
use crate::domain::repositories::{ContractRepository, StorageResult};

#[derive(sqlx::FromRow)]
struct ContractRow {
    id: Uuid,
    user_id: Uuid,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    contract_type: ContractType,
    position: String,
    salary: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ContractRow> for Contract {
    fn from(row: ContractRow) -> Self {
        let terms = ContractTerms {
            start_date: row.start_date,
            end_date: row.end_date,
            contract_type: row.contract_type,
            position: row.position,
            salary: row.salary,
        };
        Contract::from_persistence(row.id, row.user_id, terms, row.created_at, row.updated_at)
    }
}

const SELECT_CONTRACT: &str = r#"
    SELECT id, user_id, start_date, end_date, contract_type, position, salary,
           created_at, updated_at
    FROM contracts
"#;

/// PostgreSQL implementation of ContractRepository
pub struct PostgresContractRepository {
    pool: PgPool,
}

impl PostgresContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContractRepository for PostgresContractRepository {
    async fn create(&self, contract: &Contract) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contracts (
                id, user_id, start_date, end_date, contract_type, position, salary,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(contract.id())
        .bind(contract.user_id())
        .bind(contract.start_date())
        .bind(contract.end_date())
        .bind(contract.contract_type())
        .bind(contract.position())
        .bind(contract.salary())
        .bind(contract.created_at())
        .bind(contract.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create contract", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Contract>> {
        let row = sqlx::query_as::<_, ContractRow>(&format!("{} WHERE id = $1", SELECT_CONTRACT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find contract by id", e))?;

        Ok(row.map(Contract::from))
    }

    async fn find_by_user(&self, user_id: Uuid) -> StorageResult<Vec<Contract>> {
        let rows = sqlx::query_as::<_, ContractRow>(&format!(
            "{} WHERE user_id = $1 ORDER BY start_date, created_at",
            SELECT_CONTRACT
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find contracts by user", e))?;

        Ok(rows.into_iter().map(Contract::from).collect())
    }

    async fn update(&self, contract: &Contract) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE contracts
            SET start_date = $2, end_date = $3, contract_type = $4, position = $5,
                salary = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(contract.id())
        .bind(contract.start_date())
        .bind(contract.end_date())
        .bind(contract.contract_type())
        .bind(contract.position())
        .bind(contract.salary())
        .bind(contract.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update contract", e))?;

        expect_affected(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete contract", e))?;

        expect_affected(result.rows_affected())
    }

    async fn count(&self) -> StorageResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contracts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("count contracts", e))
    }

    async fn sum_salaries(&self) -> StorageResult<Decimal> {
        sqlx::query_scalar::<_, Decimal>("SELECT COALESCE(SUM(salary), 0) FROM contracts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("sum contract salaries", e))
    }
}
