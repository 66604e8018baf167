use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{expect_affected, map_sqlx_error};
use crate::domain::repositories::{StorageResult, VacationRepository};
use crate::domain::vacation::{Vacation, VacationStatus};

#[derive(sqlx::FromRow)]
struct VacationRow {
    id: Uuid,
    user_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: VacationStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VacationRow> for Vacation {
    fn from(row: VacationRow) -> Self {
        Vacation::from_persistence(
            row.id,
            row.user_id,
            row.start_date,
            row.end_date,
            row.status,
            row.created_at,
            row.updated_at,
        )
    }
}

/// PostgreSQL implementation of VacationRepository
pub struct PostgresVacationRepository {
    pool: PgPool,
}

impl PostgresVacationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VacationRepository for PostgresVacationRepository {
    async fn create(&self, vacation: &Vacation) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vacations (id, user_id, start_date, end_date, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(vacation.id())
        .bind(vacation.user_id())
        .bind(vacation.start_date())
        .bind(vacation.end_date())
        .bind(vacation.status())
        .bind(vacation.created_at())
        .bind(vacation.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create vacation", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Vacation>> {
        let row = sqlx::query_as::<_, VacationRow>(
            r#"
            SELECT id, user_id, start_date, end_date, status, created_at, updated_at
            FROM vacations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find vacation by id", e))?;

        Ok(row.map(Vacation::from))
    }

    async fn find_by_user(&self, user_id: Uuid) -> StorageResult<Vec<Vacation>> {
        let rows = sqlx::query_as::<_, VacationRow>(
            r#"
            SELECT id, user_id, start_date, end_date, status, created_at, updated_at
            FROM vacations
            WHERE user_id = $1
            ORDER BY start_date, created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find vacations by user", e))?;

        Ok(rows.into_iter().map(Vacation::from).collect())
    }

    async fn update(&self, vacation: &Vacation) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE vacations
            SET start_date = $2, end_date = $3, status = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(vacation.id())
        .bind(vacation.start_date())
        .bind(vacation.end_date())
        .bind(vacation.status())
        .bind(vacation.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update vacation", e))?;

        expect_affected(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM vacations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete vacation", e))?;

        expect_affected(result.rows_affected())
    }
}
