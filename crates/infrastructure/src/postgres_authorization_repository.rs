//! PostgreSQL-backed principal resolution and permission grants.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use switchboard_application::{PermissionRepository, PrincipalRepository};
use switchboard_core::{AppError, AppResult};
use switchboard_domain::{AdminRole, AdminUserId, PermissionSet, Principal};

/// PostgreSQL repository for staff principals and their explicit grants.
#[derive(Clone)]
pub struct PostgresAuthorizationRepository {
    pool: PgPool,
}

impl PostgresAuthorizationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PrincipalRow {
    id: uuid::Uuid,
    role: String,
    permissions: Vec<String>,
}

fn decode_permissions(admin_id: AdminUserId, names: &[String]) -> AppResult<PermissionSet> {
    PermissionSet::from_names(names.iter().map(String::as_str)).map_err(|error| {
        AppError::Internal(format!(
            "failed to decode permissions for admin '{admin_id}': {error}"
        ))
    })
}

#[async_trait]
impl PrincipalRepository for PostgresAuthorizationRepository {
    async fn find_principal(&self, admin_id: AdminUserId) -> AppResult<Option<Principal>> {
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT
                admins.id,
                admins.role,
                COALESCE(
                    array_agg(grants.permission ORDER BY grants.permission)
                        FILTER (WHERE grants.permission IS NOT NULL),
                    '{}'
                ) AS permissions
            FROM admin_users AS admins
            LEFT JOIN admin_user_permissions AS grants
                ON grants.admin_id = admins.id
            WHERE admins.id = $1
                AND admins.status = 'active'
            GROUP BY admins.id, admins.role
            "#,
        )
        .bind(admin_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to resolve principal: {error}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id = AdminUserId::from_uuid(row.id);
        let role = AdminRole::from_str(row.role.as_str()).map_err(|error| {
            AppError::Internal(format!("failed to decode role for admin '{id}': {error}"))
        })?;
        let permissions = decode_permissions(id, row.permissions.as_slice())?;

        Ok(Some(Principal::new(id, role, permissions)))
    }
}

#[async_trait]
impl PermissionRepository for PostgresAuthorizationRepository {
    async fn list_admin_permissions(&self, admin_id: AdminUserId) -> AppResult<PermissionSet> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT permission
            FROM admin_user_permissions
            WHERE admin_id = $1
            ORDER BY permission
            "#,
        )
        .bind(admin_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load permissions: {error}")))?;

        decode_permissions(admin_id, names.as_slice())
    }

    async fn replace_admin_permissions(
        &self,
        admin_id: AdminUserId,
        permissions: &PermissionSet,
    ) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to start grant transaction for admin '{admin_id}': {error}"
            ))
        })?;

        sqlx::query("DELETE FROM admin_user_permissions WHERE admin_id = $1")
            .bind(admin_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to clear grants for admin '{admin_id}': {error}"
                ))
            })?;

        sqlx::query(
            r#"
            INSERT INTO admin_user_permissions (admin_id, permission)
            SELECT $1, UNNEST($2::TEXT[])
            "#,
        )
        .bind(admin_id.as_uuid())
        .bind(permissions.names())
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to store grants for admin '{admin_id}': {error}"
            ))
        })?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to commit grant transaction for admin '{admin_id}': {error}"
            ))
        })
    }
}
