use std::sync::Arc;

use async_trait::async_trait;
use switchboard_core::{AppError, AppResult, PermissionDenial};
use switchboard_domain::{
    AdminUserId, AuthorizationDecision, PermissionRequirement, Principal, authorize,
};
use tracing::debug;

/// Identity store port resolving admin accounts into principals.
#[async_trait]
pub trait PrincipalRepository: Send + Sync {
    /// Returns the principal for an active admin account.
    ///
    /// Pending, disabled and unknown accounts resolve to `None`.
    async fn find_principal(&self, admin_id: AdminUserId) -> AppResult<Option<Principal>>;
}

/// Application service for principal resolution and permission checks.
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn PrincipalRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from an identity store.
    #[must_use]
    pub fn new(repository: Arc<dyn PrincipalRepository>) -> Self {
        Self { repository }
    }

    /// Loads the current principal for a session identity.
    ///
    /// Always reads the identity store, so role and grant changes apply on
    /// the next request.
    pub async fn resolve_principal(&self, admin_id: AdminUserId) -> AppResult<Principal> {
        self.repository
            .find_principal(admin_id)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized(format!(
                    "admin account '{admin_id}' is not active or does not exist"
                ))
            })
    }

    /// Ensures the principal satisfies a requirement.
    ///
    /// A denial carries the required, granted and missing permission names.
    pub fn require(
        &self,
        actor: &Principal,
        requirement: impl Into<PermissionRequirement>,
    ) -> AppResult<AuthorizationDecision> {
        let requirement = requirement.into();
        let decision = authorize(actor, &requirement);

        if decision.is_allowed() {
            return Ok(decision);
        }

        debug!(admin_id = %actor.id(), ?requirement, "permission check denied");
        Err(permission_denied(&requirement, &decision))
    }

    /// Returns whether the principal satisfies a requirement.
    #[must_use]
    pub fn allows(&self, actor: &Principal, requirement: impl Into<PermissionRequirement>) -> bool {
        authorize(actor, &requirement.into()).is_allowed()
    }
}

fn permission_denied(
    requirement: &PermissionRequirement,
    decision: &AuthorizationDecision,
) -> AppError {
    let names = |permissions: &[switchboard_domain::Permission]| {
        permissions
            .iter()
            .map(|permission| permission.as_str().to_owned())
            .collect::<Vec<_>>()
    };

    let required = names(decision.required());
    let message = match requirement {
        PermissionRequirement::Single(permission) => {
            format!("missing permission '{}'", permission.as_str())
        }
        PermissionRequirement::Any(_) => {
            format!("requires any of [{}]", required.join(", "))
        }
        PermissionRequirement::All(_) => {
            format!("missing permissions [{}]", names(decision.missing()).join(", "))
        }
    };

    AppError::PermissionDenied(Box::new(PermissionDenial {
        message,
        required,
        granted: decision.granted().names(),
        missing: names(decision.missing()),
    }))
}
