use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use switchboard_core::AppError;

/// Capabilities enforced by the authorization gate.
///
/// Declaration order is the catalog order used for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Allows reading end-user profiles.
    UserView,
    /// Allows creating end-user profiles.
    UserCreate,
    /// Allows editing end-user profiles and status.
    UserEdit,
    /// Allows deleting end-user profiles.
    UserDelete,
    /// Allows assigning end users to staff members.
    UserManage,
    /// Allows reading posted content.
    ContentView,
    /// Allows editing posted content.
    ContentEdit,
    /// Allows deleting posted content.
    ContentDelete,
    /// Allows publishing, hiding and removing content.
    ContentModerate,
    /// Allows reading content reports.
    ReportView,
    /// Allows resolving and dismissing content reports.
    ReportManage,
    /// Allows reading admin-staff accounts.
    AdminView,
    /// Allows creating admin-staff accounts.
    AdminCreate,
    /// Allows editing admin-staff accounts.
    AdminEdit,
    /// Allows deleting admin-staff accounts.
    AdminDelete,
    /// Allows approving pending admin-staff registrations.
    AdminApprove,
    /// Allows reading the permission catalog and grants.
    PermissionView,
    /// Allows changing admin-staff permission grants.
    PermissionManage,
    /// Allows reading tasks.
    TaskView,
    /// Allows creating and assigning tasks.
    TaskCreate,
    /// Allows deleting tasks.
    TaskManage,
    /// Allows reading the activity log.
    ActivityView,
    /// Marker grant equivalent to holding the super-admin role in checks that name it.
    SuperAdmin,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserView => "USER_VIEW",
            Self::UserCreate => "USER_CREATE",
            Self::UserEdit => "USER_EDIT",
            Self::UserDelete => "USER_DELETE",
            Self::UserManage => "USER_MANAGE",
            Self::ContentView => "CONTENT_VIEW",
            Self::ContentEdit => "CONTENT_EDIT",
            Self::ContentDelete => "CONTENT_DELETE",
            Self::ContentModerate => "CONTENT_MODERATE",
            Self::ReportView => "REPORT_VIEW",
            Self::ReportManage => "REPORT_MANAGE",
            Self::AdminView => "ADMIN_VIEW",
            Self::AdminCreate => "ADMIN_CREATE",
            Self::AdminEdit => "ADMIN_EDIT",
            Self::AdminDelete => "ADMIN_DELETE",
            Self::AdminApprove => "ADMIN_APPROVE",
            Self::PermissionView => "PERMISSION_VIEW",
            Self::PermissionManage => "PERMISSION_MANAGE",
            Self::TaskView => "TASK_VIEW",
            Self::TaskCreate => "TASK_CREATE",
            Self::TaskManage => "TASK_MANAGE",
            Self::ActivityView => "ACTIVITY_VIEW",
            Self::SuperAdmin => "SUPER_ADMIN",
        }
    }

    /// Returns the human description shown in permission pickers.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::UserView => "View end-user profiles",
            Self::UserCreate => "Create end-user profiles",
            Self::UserEdit => "Edit end-user profiles and account status",
            Self::UserDelete => "Delete end-user profiles",
            Self::UserManage => "Assign end users to staff members",
            Self::ContentView => "View posted content",
            Self::ContentEdit => "Edit posted content",
            Self::ContentDelete => "Delete posted content",
            Self::ContentModerate => "Publish, hide and remove content",
            Self::ReportView => "View content reports",
            Self::ReportManage => "Resolve and dismiss content reports",
            Self::AdminView => "View admin-staff accounts",
            Self::AdminCreate => "Create admin-staff accounts",
            Self::AdminEdit => "Edit admin-staff accounts",
            Self::AdminDelete => "Delete admin-staff accounts",
            Self::AdminApprove => "Approve pending admin-staff registrations",
            Self::PermissionView => "View permissions and grants",
            Self::PermissionManage => "Grant and revoke permissions",
            Self::TaskView => "View tasks",
            Self::TaskCreate => "Create and assign tasks",
            Self::TaskManage => "Delete tasks",
            Self::ActivityView => "View the activity log",
            Self::SuperAdmin => "Full administrative access",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::UserView,
            Permission::UserCreate,
            Permission::UserEdit,
            Permission::UserDelete,
            Permission::UserManage,
            Permission::ContentView,
            Permission::ContentEdit,
            Permission::ContentDelete,
            Permission::ContentModerate,
            Permission::ReportView,
            Permission::ReportManage,
            Permission::AdminView,
            Permission::AdminCreate,
            Permission::AdminEdit,
            Permission::AdminDelete,
            Permission::AdminApprove,
            Permission::PermissionView,
            Permission::PermissionManage,
            Permission::TaskView,
            Permission::TaskCreate,
            Permission::TaskManage,
            Permission::ActivityView,
            Permission::SuperAdmin,
        ];

        ALL
    }

    /// Parses a transport value into a permission.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Ordered, duplicate-free set of permissions held by a principal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Returns a set containing every catalog permission.
    #[must_use]
    pub fn full() -> Self {
        Self(Permission::all().iter().copied().collect())
    }

    /// Parses a list of stable storage values.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, AppError> {
        names
            .into_iter()
            .map(Permission::from_str)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Returns whether the permission is present.
    #[must_use]
    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    /// Returns whether at least one of the permissions is present.
    #[must_use]
    pub fn contains_any(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|permission| self.contains(*permission))
    }

    /// Returns the permissions that are not present, in the given order.
    #[must_use]
    pub fn missing(&self, permissions: &[Permission]) -> Vec<Permission> {
        let mut missing = Vec::new();
        for permission in permissions {
            if !self.contains(*permission) && !missing.contains(permission) {
                missing.push(*permission);
            }
        }

        missing
    }

    /// Adds a permission, returning whether it was newly inserted.
    pub fn insert(&mut self, permission: Permission) -> bool {
        self.0.insert(permission)
    }

    /// Iterates permissions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }

    /// Returns the number of permissions in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns stable storage values in catalog order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.iter()
            .map(|permission| permission.as_str().to_owned())
            .collect()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Stable activity actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// Admin account signed in.
    AdminLoggedIn,
    /// Admin account self-registered and awaits approval.
    AdminRegistered,
    /// Admin account created directly by an operator.
    AdminCreated,
    /// Pending admin account approved.
    AdminApproved,
    /// Admin account role or profile changed.
    AdminUpdated,
    /// Admin account disabled.
    AdminDisabled,
    /// Admin account deleted.
    AdminDeleted,
    /// Admin permission grants replaced.
    PermissionsUpdated,
    /// End-user profile created.
    UserCreated,
    /// End-user profile edited.
    UserUpdated,
    /// End-user account status changed.
    UserStatusChanged,
    /// End user assigned to a staff member.
    UserAssigned,
    /// End-user profile deleted.
    UserDeleted,
    /// Content edited.
    ContentUpdated,
    /// Content moderation decision recorded.
    ContentModerated,
    /// Content deleted.
    ContentDeleted,
    /// Content report resolved or dismissed.
    ReportResolved,
    /// Task created.
    TaskCreated,
    /// Task started by its assignee.
    TaskStarted,
    /// Task completion requested by its assignee.
    TaskCompletionRequested,
    /// Task completion approved by its assigner.
    TaskApproved,
    /// Task completion rejected by its assigner.
    TaskRejected,
    /// Task deleted.
    TaskDeleted,
}

impl ActivityAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdminLoggedIn => "admin.logged_in",
            Self::AdminRegistered => "admin.registered",
            Self::AdminCreated => "admin.created",
            Self::AdminApproved => "admin.approved",
            Self::AdminUpdated => "admin.updated",
            Self::AdminDisabled => "admin.disabled",
            Self::AdminDeleted => "admin.deleted",
            Self::PermissionsUpdated => "permission.updated",
            Self::UserCreated => "user.created",
            Self::UserUpdated => "user.updated",
            Self::UserStatusChanged => "user.status_changed",
            Self::UserAssigned => "user.assigned",
            Self::UserDeleted => "user.deleted",
            Self::ContentUpdated => "content.updated",
            Self::ContentModerated => "content.moderated",
            Self::ContentDeleted => "content.deleted",
            Self::ReportResolved => "report.resolved",
            Self::TaskCreated => "task.created",
            Self::TaskStarted => "task.started",
            Self::TaskCompletionRequested => "task.completion_requested",
            Self::TaskApproved => "task.approved",
            Self::TaskRejected => "task.rejected",
            Self::TaskDeleted => "task.deleted",
        }
    }
}
