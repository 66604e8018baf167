use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use super::{expect_affected, map_sqlx_error};
use crate::domain::repositories::{StorageError, StorageResult, UserRepository};
use crate::domain::user::{Email, Role, User};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    company_id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StorageError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(row.email)
            .map_err(|e| StorageError::Backend(format!("invalid email from database: {}", e)))?;

        Ok(User::from_persistence(
            row.id,
            row.company_id,
            row.name,
            email,
            row.password_hash,
            row.role,
            row.created_at,
            row.updated_at,
        ))
    }
}

const SELECT_USER: &str = r#"
    SELECT id, company_id, name, email, password_hash, role, created_at, updated_at
    FROM users
"#;

async fn insert_user<'e, E>(executor: E, user: &User) -> StorageResult<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO users (
            id, company_id, name, email, password_hash, role, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(user.id())
    .bind(user.company_id())
    .bind(user.name())
    .bind(user.email().as_str())
    .bind(user.password_hash())
    .bind(user.role())
    .bind(user.created_at())
    .bind(user.updated_at())
    .execute(executor)
    .await
    .map_err(|e| map_sqlx_error("create user", e))?;

    Ok(())
}

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> StorageResult<()> {
        insert_user(&self.pool, user).await
    }

    async fn create_batch(&self, users: &[User]) -> StorageResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin user batch", e))?;

        // Returning early drops the transaction, which rolls it back
        for user in users {
            insert_user(&mut *tx, user).await?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit user batch", e))
    }

    async fn create_if_company_empty(
        &self,
        company_id: Uuid,
        users: &[User],
    ) -> StorageResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin company bootstrap", e))?;

        // Concurrent bootstraps of one company queue on this row lock
        let company = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM companies WHERE id = $1 FOR UPDATE",
        )
        .bind(company_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("lock company", e))?;
        if company.is_none() {
            return Err(StorageError::NoRowsAffected);
        }

        let members = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE company_id = $1",
        )
        .bind(company_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("count users by company", e))?;
        if members > 0 {
            return Ok(false);
        }

        for user in users {
            insert_user(&mut *tx, user).await?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit company bootstrap", e))?;
        Ok(true)
    }

    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find user by id", e))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE email = $1", SELECT_USER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find user by email", e))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_company(&self, company_id: Uuid) -> StorageResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "{} WHERE company_id = $1 ORDER BY created_at, id",
            SELECT_USER
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find users by company", e))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update(&self, user: &User) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = $3, role = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id())
        .bind(user.name())
        .bind(user.email().as_str())
        .bind(user.role())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update user", e))?;

        expect_affected(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete user", e))?;

        expect_affected(result.rows_affected())
    }

    async fn count(&self) -> StorageResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("count users", e))
    }

    async fn count_by_company(&self, company_id: Uuid) -> StorageResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE company_id = $1")
            .bind(company_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("count users by company", e))
    }
}
