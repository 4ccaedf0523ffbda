//! Domain entities and invariants.

#![forbid(unsafe_code)]

/// Declares a UUID-backed identifier newtype.
macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID value.
            #[must_use]
            pub fn from_uuid(value: uuid::Uuid) -> Self {
                Self(value)
            }

            /// Parses an identifier from its hyphenated transport form.
            pub fn parse(value: &str) -> switchboard_core::AppResult<Self> {
                uuid::Uuid::parse_str(value.trim()).map(Self).map_err(|error| {
                    switchboard_core::AppError::Validation(format!(
                        "invalid {} '{value}': {error}",
                        stringify!($name)
                    ))
                })
            }

            /// Returns the underlying UUID value.
            #[must_use]
            pub fn as_uuid(&self) -> uuid::Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

mod admin;
mod authorization;
mod content;
mod end_user;
mod security;
mod task;

pub use admin::{
    AdminRole, AdminStatus, AdminUserId, EmailAddress, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH,
    validate_password,
};
pub use authorization::{AuthorizationDecision, PermissionRequirement, Principal, authorize};
pub use content::{
    ContentId, ContentStatus, ModerationDecision, ReportId, ReportResolution, ReportStatus,
};
pub use end_user::{EndUserId, EndUserStatus, Username};
pub use security::{ActivityAction, Permission, PermissionSet};
pub use task::{Task, TaskAction, TaskId, TaskParts, TaskStatus, TaskTransition};
