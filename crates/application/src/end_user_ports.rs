use async_trait::async_trait;
use chrono::{DateTime, Utc};
use switchboard_core::AppResult;
use switchboard_domain::{AdminUserId, EmailAddress, EndUserId, EndUserStatus, Username};

/// End-user profile on the moderated platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndUser {
    /// Profile identifier.
    pub id: EndUserId,
    /// Unique platform handle.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Public display name.
    pub display_name: String,
    /// Optional profile text.
    pub bio: Option<String>,
    /// Moderation standing.
    pub status: EndUserStatus,
    /// Staff member responsible for this profile.
    pub assigned_to: Option<AdminUserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting an end-user profile.
#[derive(Debug, Clone)]
pub struct NewEndUser {
    /// Unique platform handle.
    pub username: Username,
    /// Contact email.
    pub email: EmailAddress,
    /// Public display name.
    pub display_name: String,
    /// Optional profile text.
    pub bio: Option<String>,
    /// Initial assignee.
    pub assigned_to: Option<AdminUserId>,
}

/// Editable profile fields, applied as a full replacement.
#[derive(Debug, Clone)]
pub struct EndUserProfile {
    /// Contact email.
    pub email: EmailAddress,
    /// Public display name.
    pub display_name: String,
    /// Optional profile text.
    pub bio: Option<String>,
}

/// Filter and page for end-user listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndUserQuery {
    /// Only profiles in this status.
    pub status: Option<EndUserStatus>,
    /// Case-insensitive match on username, display name or email.
    pub search: Option<String>,
    /// Only profiles assigned to this staff member.
    pub assigned_to: Option<AdminUserId>,
    /// Maximum rows returned.
    pub limit: usize,
    /// Rows skipped.
    pub offset: usize,
}

/// Repository port for end-user profiles.
#[async_trait]
pub trait EndUserRepository: Send + Sync {
    /// Finds a profile by identifier.
    async fn find_end_user(&self, end_user_id: EndUserId) -> AppResult<Option<EndUser>>;

    /// Lists profiles, newest first.
    async fn list_end_users(&self, query: EndUserQuery) -> AppResult<Vec<EndUser>>;

    /// Inserts a profile. Duplicate usernames fail with `Conflict`.
    async fn create_end_user(&self, end_user: NewEndUser) -> AppResult<EndUser>;

    /// Replaces editable profile fields.
    async fn update_end_user(
        &self,
        end_user_id: EndUserId,
        profile: EndUserProfile,
    ) -> AppResult<EndUser>;

    /// Sets the moderation standing.
    async fn set_end_user_status(
        &self,
        end_user_id: EndUserId,
        status: EndUserStatus,
    ) -> AppResult<EndUser>;

    /// Sets or clears the assignee.
    async fn assign_end_user(
        &self,
        end_user_id: EndUserId,
        assigned_to: Option<AdminUserId>,
    ) -> AppResult<EndUser>;

    /// Deletes a profile together with its content and reports.
    async fn delete_end_user(&self, end_user_id: EndUserId) -> AppResult<()>;
}
