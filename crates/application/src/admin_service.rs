//! Admin-staff account use-cases: sign-in, registration and account
//! administration.
//!
//! Sign-in failures share one generic outcome so callers cannot tell which
//! emails exist.

mod authentication;
mod management;

use std::sync::Arc;

use switchboard_core::{AppError, AppResult};
use switchboard_domain::{AdminRole, AdminUserId, Principal};

use crate::{
    ActivityLogService, AdminAccount, AdminUserRepository, AuthorizationService, PasswordHasher,
};

/// Input for self-registration and the bootstrap account.
#[derive(Debug, Clone)]
pub struct RegisterAdminParams {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Name shown in the dashboard.
    pub display_name: String,
}

/// Input for operator-created accounts.
#[derive(Debug, Clone)]
pub struct CreateAdminParams {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Name shown in the dashboard.
    pub display_name: String,
    /// Staff role.
    pub role: AdminRole,
}

/// Partial account update.
#[derive(Debug, Clone, Default)]
pub struct UpdateAdminParams {
    /// New display name.
    pub display_name: Option<String>,
    /// New staff role.
    pub role: Option<AdminRole>,
}

/// Result of a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials valid and the account is active.
    Authenticated(AdminAccount),
    /// Any failure. Deliberately carries no reason.
    Failed,
}

/// Application service for admin-staff accounts.
#[derive(Clone)]
pub struct AdminService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn AdminUserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    activity_log_service: ActivityLogService,
}

impl AdminService {
    /// Creates a new admin service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn AdminUserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        activity_log_service: ActivityLogService,
    ) -> Self {
        Self {
            authorization_service,
            repository,
            password_hasher,
            activity_log_service,
        }
    }

    async fn require_account(&self, admin_id: AdminUserId) -> AppResult<AdminAccount> {
        self.repository
            .find_admin(admin_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("admin account '{admin_id}' not found")))
    }
}

/// Rejects operations a non-super actor attempts on a super-role account.
fn ensure_may_manage(actor: &Principal, target: &AdminAccount, verb: &str) -> AppResult<()> {
    if target.role.is_super_role() && !actor.is_super_admin() {
        return Err(AppError::Forbidden(format!(
            "only a super admin may {verb} super admin account '{}'",
            target.id
        )));
    }

    Ok(())
}

/// Rejects operations an actor attempts on its own account.
fn ensure_not_self(actor: &Principal, target: AdminUserId, verb: &str) -> AppResult<()> {
    if actor.id() == target {
        return Err(AppError::Forbidden(format!(
            "cannot {verb} your own admin account"
        )));
    }

    Ok(())
}
