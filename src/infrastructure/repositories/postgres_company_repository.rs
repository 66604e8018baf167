use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{expect_affected, map_sqlx_error};
use crate::domain::company::Company;
use crate::domain::repositories::{CompanyRepository, StorageResult};

#[derive(sqlx::FromRow)]
struct CompanyRow {
    id: Uuid,
    name: String,
    tax_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Company::from_persistence(row.id, row.name, row.tax_id, row.created_at, row.updated_at)
    }
}

/// PostgreSQL implementation of CompanyRepository
pub struct PostgresCompanyRepository {
    pool: PgPool,
}

impl PostgresCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn create(&self, company: &Company) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO companies (id, name, tax_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(company.id())
        .bind(company.name())
        .bind(company.tax_id())
        .bind(company.created_at())
        .bind(company.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create company", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Company>> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r#"
            SELECT id, name, tax_id, created_at, updated_at
            FROM companies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find company by id", e))?;

        Ok(row.map(Company::from))
    }

    async fn find_by_tax_id(&self, tax_id: &str) -> StorageResult<Option<Company>> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r#"
            SELECT id, name, tax_id, created_at, updated_at
            FROM companies
            WHERE tax_id = $1
            "#,
        )
        .bind(tax_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find company by tax id", e))?;

        Ok(row.map(Company::from))
    }

    async fn update(&self, company: &Company) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE companies
            SET name = $2, tax_id = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(company.id())
        .bind(company.name())
        .bind(company.tax_id())
        .bind(company.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update company", e))?;

        expect_affected(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        // users, contracts and vacations go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete company", e))?;

        expect_affected(result.rows_affected())
    }

    async fn count(&self) -> StorageResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM companies")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("count companies", e))
    }
}
