use serde_json::json;
use switchboard_core::NonEmptyString;
use switchboard_domain::{ActivityAction, AdminStatus, EmailAddress, validate_password};
use tracing::info;

use crate::{ActivityEvent, NewAdminAccount};

use super::*;

impl AdminService {
    /// Registers a pending admin account awaiting approval.
    pub async fn register(&self, params: RegisterAdminParams) -> AppResult<AdminAccount> {
        let account = self
            .insert_account(params, AdminRole::Manager, AdminStatus::Pending)
            .await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                account.id,
                ActivityAction::AdminRegistered,
                format!("'{}' registered and awaits approval", account.email),
                json!({ "admin_id": account.id, "email": account.email }),
            ))
            .await;

        Ok(account)
    }

    /// Creates the first super admin. Fails once any super admin exists.
    ///
    /// The caller is responsible for checking the bootstrap token.
    pub async fn bootstrap_super_admin(
        &self,
        params: RegisterAdminParams,
    ) -> AppResult<AdminAccount> {
        if self.repository.count_super_admins().await? > 0 {
            return Err(AppError::Conflict(
                "a super admin account already exists".to_owned(),
            ));
        }

        let account = self
            .insert_account(params, AdminRole::SuperAdmin, AdminStatus::Active)
            .await?;
        info!(admin_id = %account.id, "bootstrapped super admin account");

        self.activity_log_service
            .record(ActivityEvent::new(
                account.id,
                ActivityAction::AdminCreated,
                format!("bootstrapped super admin '{}'", account.email),
                json!({ "admin_id": account.id, "role": account.role.as_str() }),
            ))
            .await;

        Ok(account)
    }

    /// Authenticates with email and password.
    ///
    /// Unknown emails, wrong passwords and non-active accounts all return
    /// `LoginOutcome::Failed`.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let email = email.trim().to_lowercase();
        let Some(credentials) = self.repository.find_credentials_by_email(&email).await? else {
            // Hash anyway so unknown emails cost the same as wrong passwords.
            let _ = self.password_hasher.hash_password(password);
            return Ok(LoginOutcome::Failed);
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, &credentials.password_hash)?;
        if !password_valid || credentials.account.status != AdminStatus::Active {
            return Ok(LoginOutcome::Failed);
        }

        let account = credentials.account;
        self.activity_log_service
            .record(ActivityEvent::new(
                account.id,
                ActivityAction::AdminLoggedIn,
                format!("'{}' signed in", account.email),
                json!({ "admin_id": account.id }),
            ))
            .await;

        Ok(LoginOutcome::Authenticated(account))
    }

    pub(super) async fn insert_account(
        &self,
        params: RegisterAdminParams,
        role: AdminRole,
        status: AdminStatus,
    ) -> AppResult<AdminAccount> {
        let email = EmailAddress::new(params.email)?;
        let display_name = NonEmptyString::new(params.display_name)?;
        validate_password(&params.password)?;

        if self
            .repository
            .find_credentials_by_email(email.as_str())
            .await?
            .is_some()
        {
            let _ = self.password_hasher.hash_password(&params.password);
            return Err(AppError::Conflict(format!(
                "an admin account with email '{}' already exists",
                email.as_str()
            )));
        }

        let password_hash = self.password_hasher.hash_password(&params.password)?;
        self.repository
            .create_admin(NewAdminAccount {
                email,
                display_name: display_name.into(),
                password_hash,
                role,
                status,
            })
            .await
    }
}
