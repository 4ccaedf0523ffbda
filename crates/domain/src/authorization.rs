//! Authorization gate.
//!
//! The gate is a pure predicate over an already-resolved [`Principal`]. The
//! super-role bypass is decided here and nowhere else.

use crate::{AdminRole, AdminUserId, Permission, PermissionSet};

/// Authenticated admin-staff actor with its resolved grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    id: AdminUserId,
    role: AdminRole,
    permissions: PermissionSet,
}

impl Principal {
    /// Creates a principal from identity-store state.
    #[must_use]
    pub fn new(id: AdminUserId, role: AdminRole, permissions: PermissionSet) -> Self {
        Self {
            id,
            role,
            permissions,
        }
    }

    /// Returns the admin account identifier.
    #[must_use]
    pub fn id(&self) -> AdminUserId {
        self.id
    }

    /// Returns the staff role.
    #[must_use]
    pub fn role(&self) -> AdminRole {
        self.role
    }

    /// Returns the explicitly granted permissions.
    #[must_use]
    pub fn granted_permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// Returns whether this principal holds the super-role.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role.is_super_role()
    }

    /// Returns the permissions this principal effectively holds.
    ///
    /// The super-role implicitly holds the whole catalog.
    #[must_use]
    pub fn effective_permissions(&self) -> PermissionSet {
        if self.is_super_admin() {
            PermissionSet::full()
        } else {
            self.permissions.clone()
        }
    }

    /// Returns whether this principal may act on an end user with the given
    /// assignment. Managers only reach end users assigned to them.
    #[must_use]
    pub fn can_access_end_user(&self, assigned_to: Option<AdminUserId>) -> bool {
        match self.role {
            AdminRole::SuperAdmin | AdminRole::Admin => true,
            AdminRole::Manager => assigned_to == Some(self.id),
        }
    }

    /// Returns whether this principal is the given account or holds the
    /// super-role.
    #[must_use]
    pub fn is_self_or_super_admin(&self, account: AdminUserId) -> bool {
        self.is_super_admin() || self.id == account
    }
}

/// Permission requirement declared by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionRequirement {
    /// Exactly this permission must be held.
    Single(Permission),
    /// At least one of these permissions must be held.
    Any(Vec<Permission>),
    /// Every one of these permissions must be held.
    All(Vec<Permission>),
}

impl PermissionRequirement {
    /// Builds an any-of requirement.
    #[must_use]
    pub fn any(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self::Any(permissions.into_iter().collect())
    }

    /// Builds an all-of requirement.
    #[must_use]
    pub fn all(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self::All(permissions.into_iter().collect())
    }

    /// Returns the permissions named by the requirement.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        match self {
            Self::Single(permission) => std::slice::from_ref(permission),
            Self::Any(permissions) | Self::All(permissions) => permissions.as_slice(),
        }
    }
}

impl From<Permission> for PermissionRequirement {
    fn from(value: Permission) -> Self {
        Self::Single(value)
    }
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationDecision {
    allowed: bool,
    required: Vec<Permission>,
    granted: PermissionSet,
    missing: Vec<Permission>,
}

impl AuthorizationDecision {
    /// Returns whether the operation may proceed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Returns the permissions named by the evaluated requirement.
    #[must_use]
    pub fn required(&self) -> &[Permission] {
        self.required.as_slice()
    }

    /// Returns the principal's effective permissions, for diagnostics.
    #[must_use]
    pub fn granted(&self) -> &PermissionSet {
        &self.granted
    }

    /// Returns required permissions the principal lacks.
    ///
    /// Populated for single and all-of requirements; an any-of denial lacks
    /// every listed permission by definition and leaves this empty.
    #[must_use]
    pub fn missing(&self) -> &[Permission] {
        self.missing.as_slice()
    }
}

/// Evaluates a requirement against a principal.
///
/// The super-role is always allowed. An empty any-of requirement is never
/// satisfied by explicit grants; an empty all-of requirement always is.
#[must_use]
pub fn authorize(
    principal: &Principal,
    requirement: &PermissionRequirement,
) -> AuthorizationDecision {
    let required = requirement.permissions().to_vec();

    if principal.is_super_admin() {
        return AuthorizationDecision {
            allowed: true,
            required,
            granted: principal.effective_permissions(),
            missing: Vec::new(),
        };
    }

    let granted = principal.granted_permissions();
    let (allowed, missing) = match requirement {
        PermissionRequirement::Single(_) | PermissionRequirement::All(_) => {
            let missing = granted.missing(required.as_slice());
            (missing.is_empty(), missing)
        }
        PermissionRequirement::Any(permissions) => {
            (granted.contains_any(permissions.as_slice()), Vec::new())
        }
    };

    AuthorizationDecision {
        allowed,
        required,
        granted: granted.clone(),
        missing,
    }
}
