//! PostgreSQL-backed admin-staff account repository.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use switchboard_application::{
    AdminAccount, AdminAccountQuery, AdminCredentials, AdminUserRepository, NewAdminAccount,
};
use switchboard_core::{AppError, AppResult};
use switchboard_domain::{AdminRole, AdminStatus, AdminUserId};

/// PostgreSQL implementation of the admin account port.
#[derive(Clone)]
pub struct PostgresAdminUserRepository {
    pool: PgPool,
}

impl PostgresAdminUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AdminAccountRow {
    id: uuid::Uuid,
    email: String,
    display_name: String,
    role: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminAccountRow> for AdminAccount {
    type Error = AppError;

    fn try_from(row: AdminAccountRow) -> Result<Self, Self::Error> {
        let role = AdminRole::from_str(row.role.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "failed to decode role for admin '{}': {error}",
                row.id
            ))
        })?;
        let status = AdminStatus::from_str(row.status.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "failed to decode status for admin '{}': {error}",
                row.id
            ))
        })?;

        Ok(Self {
            id: AdminUserId::from_uuid(row.id),
            email: row.email,
            display_name: row.display_name,
            role,
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct AdminCredentialsRow {
    #[sqlx(flatten)]
    account: AdminAccountRow,
    password_hash: String,
}

fn email_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("an admin account with this email already exists".to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}

fn admin_not_found(admin_id: AdminUserId) -> AppError {
    AppError::NotFound(format!("admin account '{admin_id}' does not exist"))
}

#[async_trait]
impl AdminUserRepository for PostgresAdminUserRepository {
    async fn find_admin(&self, admin_id: AdminUserId) -> AppResult<Option<AdminAccount>> {
        sqlx::query_as::<_, AdminAccountRow>(
            r#"
            SELECT id, email, display_name, role, status, created_at
            FROM admin_users
            WHERE id = $1
            "#,
        )
        .bind(admin_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load admin account: {error}")))?
        .map(AdminAccount::try_from)
        .transpose()
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> AppResult<Option<AdminCredentials>> {
        let row = sqlx::query_as::<_, AdminCredentialsRow>(
            r#"
            SELECT id, email, display_name, role, status, created_at, password_hash
            FROM admin_users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load admin credentials: {error}"))
        })?;

        row.map(|row| {
            Ok(AdminCredentials {
                account: AdminAccount::try_from(row.account)?,
                password_hash: row.password_hash,
            })
        })
        .transpose()
    }

    async fn create_admin(&self, account: NewAdminAccount) -> AppResult<AdminAccount> {
        let row = sqlx::query_as::<_, AdminAccountRow>(
            r#"
            INSERT INTO admin_users (id, email, display_name, password_hash, role, status)
            VALUES ($1, LOWER($2), $3, $4, $5, $6)
            RETURNING id, email, display_name, role, status, created_at
            "#,
        )
        .bind(AdminUserId::new().as_uuid())
        .bind(account.email.as_str())
        .bind(account.display_name.as_str())
        .bind(account.password_hash.as_str())
        .bind(account.role.as_str())
        .bind(account.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| email_conflict_or_internal(error, "create admin account"))?;

        AdminAccount::try_from(row)
    }

    async fn list_admins(&self, query: AdminAccountQuery) -> AppResult<Vec<AdminAccount>> {
        let rows = sqlx::query_as::<_, AdminAccountRow>(
            r#"
            SELECT id, email, display_name, role, status, created_at
            FROM admin_users
            WHERE ($1::TEXT IS NULL OR status = $1)
                AND ($2::TEXT IS NULL OR role = $2)
            ORDER BY created_at ASC, email ASC
            "#,
        )
        .bind(query.status.map(|status| status.as_str()))
        .bind(query.role.map(|role| role.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list admin accounts: {error}")))?;

        rows.into_iter().map(AdminAccount::try_from).collect()
    }

    async fn update_admin(
        &self,
        admin_id: AdminUserId,
        display_name: &str,
        role: AdminRole,
    ) -> AppResult<AdminAccount> {
        sqlx::query_as::<_, AdminAccountRow>(
            r#"
            UPDATE admin_users
            SET display_name = $2, role = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, email, display_name, role, status, created_at
            "#,
        )
        .bind(admin_id.as_uuid())
        .bind(display_name)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update admin account: {error}")))?
        .ok_or_else(|| admin_not_found(admin_id))
        .and_then(AdminAccount::try_from)
    }

    async fn set_admin_status(
        &self,
        admin_id: AdminUserId,
        status: AdminStatus,
    ) -> AppResult<AdminAccount> {
        sqlx::query_as::<_, AdminAccountRow>(
            r#"
            UPDATE admin_users
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, email, display_name, role, status, created_at
            "#,
        )
        .bind(admin_id.as_uuid())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to change admin account status: {error}"))
        })?
        .ok_or_else(|| admin_not_found(admin_id))
        .and_then(AdminAccount::try_from)
    }

    async fn delete_admin(&self, admin_id: AdminUserId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM admin_users WHERE id = $1")
            .bind(admin_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to delete admin account: {error}"))
            })?;

        if result.rows_affected() == 0 {
            return Err(admin_not_found(admin_id));
        }

        Ok(())
    }

    async fn count_super_admins(&self) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM admin_users WHERE role = 'super_admin'")
                .fetch_one(&self.pool)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to count super admins: {error}"))
                })?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}
