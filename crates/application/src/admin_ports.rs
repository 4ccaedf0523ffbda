use async_trait::async_trait;
use chrono::{DateTime, Utc};
use switchboard_core::AppResult;
use switchboard_domain::{AdminRole, AdminStatus, AdminUserId, EmailAddress, PermissionSet};

/// Admin-staff account as stored, without credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccount {
    /// Account identifier.
    pub id: AdminUserId,
    /// Canonical login email.
    pub email: String,
    /// Name shown in the dashboard.
    pub display_name: String,
    /// Staff role.
    pub role: AdminRole,
    /// Lifecycle status.
    pub status: AdminStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Account paired with its stored password hash, for sign-in only.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    /// Account record.
    pub account: AdminAccount,
    /// Argon2id PHC hash.
    pub password_hash: String,
}

/// Input for inserting a new admin account.
#[derive(Debug, Clone)]
pub struct NewAdminAccount {
    /// Canonical login email.
    pub email: EmailAddress,
    /// Name shown in the dashboard.
    pub display_name: String,
    /// Argon2id PHC hash.
    pub password_hash: String,
    /// Staff role.
    pub role: AdminRole,
    /// Initial lifecycle status.
    pub status: AdminStatus,
}

/// Filter for admin account listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAccountQuery {
    /// Only accounts in this status.
    pub status: Option<AdminStatus>,
    /// Only accounts with this role.
    pub role: Option<AdminRole>,
}

/// Repository port for admin-staff accounts.
#[async_trait]
pub trait AdminUserRepository: Send + Sync {
    /// Finds an account by identifier.
    async fn find_admin(&self, admin_id: AdminUserId) -> AppResult<Option<AdminAccount>>;

    /// Finds credentials by canonical email.
    async fn find_credentials_by_email(&self, email: &str)
    -> AppResult<Option<AdminCredentials>>;

    /// Inserts a new account. Duplicate emails fail with `Conflict`.
    async fn create_admin(&self, account: NewAdminAccount) -> AppResult<AdminAccount>;

    /// Lists accounts ordered by creation time.
    async fn list_admins(&self, query: AdminAccountQuery) -> AppResult<Vec<AdminAccount>>;

    /// Updates display name and role.
    async fn update_admin(
        &self,
        admin_id: AdminUserId,
        display_name: &str,
        role: AdminRole,
    ) -> AppResult<AdminAccount>;

    /// Sets the lifecycle status.
    async fn set_admin_status(
        &self,
        admin_id: AdminUserId,
        status: AdminStatus,
    ) -> AppResult<AdminAccount>;

    /// Deletes an account. Assigned end users are kept with no assignee.
    async fn delete_admin(&self, admin_id: AdminUserId) -> AppResult<()>;

    /// Counts accounts holding the super-role, in any status.
    async fn count_super_admins(&self) -> AppResult<u64>;
}

/// Repository port for explicit permission grants.
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Returns the explicit grants of an admin account.
    async fn list_admin_permissions(&self, admin_id: AdminUserId) -> AppResult<PermissionSet>;

    /// Replaces the explicit grants of an admin account atomically.
    async fn replace_admin_permissions(
        &self,
        admin_id: AdminUserId,
        permissions: &PermissionSet,
    ) -> AppResult<()>;
}

/// Port for password hashing operations. Keeps domain/application free of
/// direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password using Argon2id.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}
