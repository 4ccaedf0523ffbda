use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Admin account reference persisted in the authenticated session.
///
/// Holds identity only. Role and permissions are re-read from storage on
/// every request so revocations take effect immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    admin_id: Uuid,
    email: String,
    display_name: String,
}

impl SessionIdentity {
    /// Creates a session identity for an authenticated admin account.
    #[must_use]
    pub fn new(admin_id: Uuid, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            admin_id,
            email: email.into(),
            display_name: display_name.into(),
        }
    }

    /// Returns the admin account identifier.
    #[must_use]
    pub fn admin_id(&self) -> Uuid {
        self.admin_id
    }

    /// Returns the login email captured at sign-in.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the display name captured at sign-in.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }
}
