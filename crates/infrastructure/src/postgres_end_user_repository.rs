//! PostgreSQL-backed end-user profile repository.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use switchboard_application::{EndUser, EndUserProfile, EndUserQuery, EndUserRepository, NewEndUser};
use switchboard_core::{AppError, AppResult};
use switchboard_domain::{AdminUserId, EndUserId, EndUserStatus};

/// PostgreSQL implementation of the end-user port.
#[derive(Clone)]
pub struct PostgresEndUserRepository {
    pool: PgPool,
}

impl PostgresEndUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EndUserRow {
    id: uuid::Uuid,
    username: String,
    email: String,
    display_name: String,
    bio: Option<String>,
    status: String,
    assigned_to: Option<uuid::Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EndUserRow> for EndUser {
    type Error = AppError;

    fn try_from(row: EndUserRow) -> Result<Self, Self::Error> {
        let status = EndUserStatus::from_str(row.status.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "failed to decode status for end user '{}': {error}",
                row.id
            ))
        })?;

        Ok(Self {
            id: EndUserId::from_uuid(row.id),
            username: row.username,
            email: row.email,
            display_name: row.display_name,
            bio: row.bio,
            status,
            assigned_to: row.assigned_to.map(AdminUserId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const END_USER_COLUMNS: &str =
    "id, username, email, display_name, bio, status, assigned_to, created_at, updated_at";

fn end_user_not_found(end_user_id: EndUserId) -> AppError {
    AppError::NotFound(format!("end user '{end_user_id}' does not exist"))
}

fn username_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("an end user with this username already exists".to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}

impl PostgresEndUserRepository {
    async fn fetch_updated(
        &self,
        end_user_id: EndUserId,
        query: sqlx::query::QueryAs<'_, sqlx::Postgres, EndUserRow, sqlx::postgres::PgArguments>,
        operation: &str,
    ) -> AppResult<EndUser> {
        query
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to {operation}: {error}")))?
            .ok_or_else(|| end_user_not_found(end_user_id))
            .and_then(EndUser::try_from)
    }
}

/// Escapes `LIKE` metacharacters so search input only matches literally.
fn escape_like_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        if matches!(character, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

#[async_trait]
impl EndUserRepository for PostgresEndUserRepository {
    async fn find_end_user(&self, end_user_id: EndUserId) -> AppResult<Option<EndUser>> {
        let statement = format!("SELECT {END_USER_COLUMNS} FROM end_users WHERE id = $1");

        sqlx::query_as::<_, EndUserRow>(statement.as_str())
            .bind(end_user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to load end user: {error}")))?
            .map(EndUser::try_from)
            .transpose()
    }

    async fn list_end_users(&self, query: EndUserQuery) -> AppResult<Vec<EndUser>> {
        let statement = format!(
            r#"
            SELECT {END_USER_COLUMNS}
            FROM end_users
            WHERE ($1::TEXT IS NULL OR status = $1)
                AND ($2::UUID IS NULL OR assigned_to = $2)
                AND (
                    $3::TEXT IS NULL
                    OR username ILIKE '%' || $3 || '%' ESCAPE '\'
                    OR email ILIKE '%' || $3 || '%' ESCAPE '\'
                    OR display_name ILIKE '%' || $3 || '%' ESCAPE '\'
                )
            ORDER BY created_at DESC, username ASC
            LIMIT $4
            OFFSET $5
            "#
        );

        let rows = sqlx::query_as::<_, EndUserRow>(statement.as_str())
            .bind(query.status.map(|status| status.as_str()))
            .bind(query.assigned_to.map(|admin_id| admin_id.as_uuid()))
            .bind(query.search.as_deref().map(escape_like_pattern))
            .bind(i64::try_from(query.limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(query.offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to list end users: {error}")))?;

        rows.into_iter().map(EndUser::try_from).collect()
    }

    async fn create_end_user(&self, end_user: NewEndUser) -> AppResult<EndUser> {
        let statement = format!(
            r#"
            INSERT INTO end_users (id, username, email, display_name, bio, assigned_to)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {END_USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, EndUserRow>(statement.as_str())
            .bind(EndUserId::new().as_uuid())
            .bind(end_user.username.as_str())
            .bind(end_user.email.as_str())
            .bind(end_user.display_name.as_str())
            .bind(end_user.bio.as_deref())
            .bind(end_user.assigned_to.map(|admin_id| admin_id.as_uuid()))
            .fetch_one(&self.pool)
            .await
            .map_err(|error| username_conflict_or_internal(error, "create end user"))?;

        EndUser::try_from(row)
    }

    async fn update_end_user(
        &self,
        end_user_id: EndUserId,
        profile: EndUserProfile,
    ) -> AppResult<EndUser> {
        let statement = format!(
            r#"
            UPDATE end_users
            SET email = $2, display_name = $3, bio = $4, updated_at = now()
            WHERE id = $1
            RETURNING {END_USER_COLUMNS}
            "#
        );

        let query = sqlx::query_as::<_, EndUserRow>(statement.as_str())
            .bind(end_user_id.as_uuid())
            .bind(profile.email.as_str().to_owned())
            .bind(profile.display_name)
            .bind(profile.bio);

        self.fetch_updated(end_user_id, query, "update end user")
            .await
    }

    async fn set_end_user_status(
        &self,
        end_user_id: EndUserId,
        status: EndUserStatus,
    ) -> AppResult<EndUser> {
        let statement = format!(
            r#"
            UPDATE end_users
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING {END_USER_COLUMNS}
            "#
        );

        let query = sqlx::query_as::<_, EndUserRow>(statement.as_str())
            .bind(end_user_id.as_uuid())
            .bind(status.as_str());

        self.fetch_updated(end_user_id, query, "change end user status")
            .await
    }

    async fn assign_end_user(
        &self,
        end_user_id: EndUserId,
        assigned_to: Option<AdminUserId>,
    ) -> AppResult<EndUser> {
        let statement = format!(
            r#"
            UPDATE end_users
            SET assigned_to = $2, updated_at = now()
            WHERE id = $1
            RETURNING {END_USER_COLUMNS}
            "#
        );

        let query = sqlx::query_as::<_, EndUserRow>(statement.as_str())
            .bind(end_user_id.as_uuid())
            .bind(assigned_to.map(|admin_id| admin_id.as_uuid()));

        self.fetch_updated(end_user_id, query, "assign end user")
            .await
    }

    async fn delete_end_user(&self, end_user_id: EndUserId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM end_users WHERE id = $1")
            .bind(end_user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete end user: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(end_user_not_found(end_user_id));
        }

        Ok(())
    }
}
