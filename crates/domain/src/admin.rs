//! Admin-staff account types and validation rules.
//!
//! Password rules follow the OWASP Authentication cheat sheet: a length
//! window plus an embedded breached-password deny list.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use switchboard_core::{AppError, AppResult};

uuid_identifier!(
    /// Unique identifier for an admin-staff account.
    AdminUserId
);

/// Staff role. The role decides whether explicit grants are consulted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Super-role. Bypasses every explicit permission check.
    SuperAdmin,
    /// Administrator with an explicit grant set.
    Admin,
    /// Manager with an explicit grant set, scoped to assigned end users.
    Manager,
}

impl AdminRole {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Manager => "manager",
        }
    }

    /// Returns whether this is the super-role.
    #[must_use]
    pub fn is_super_role(&self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl FromStr for AdminRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            _ => Err(AppError::Validation(format!("unknown admin role '{value}'"))),
        }
    }
}

/// Lifecycle of an admin-staff account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminStatus {
    /// Self-registered, waiting for approval. Cannot sign in.
    Pending,
    /// Approved and allowed to sign in.
    Active,
    /// Switched off by an operator. Cannot sign in.
    Disabled,
}

impl AdminStatus {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Disabled => "disabled",
        }
    }
}

impl FromStr for AdminStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "disabled" => Ok(Self::Disabled),
            _ => Err(AppError::Validation(format!(
                "unknown admin status '{value}'"
            ))),
        }
    }
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated, lower-cased email address.
    ///
    /// Performs structural validation only: exactly one `@`, non-empty local
    /// part, and a domain containing at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Minimum password length for staff accounts.
pub const PASSWORD_MIN_LENGTH: usize = 10;

/// Maximum password length; bounds Argon2 work per request.
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Validates a plaintext password for a staff account.
pub fn validate_password(password: &str) -> AppResult<()> {
    let char_count = password.chars().count();

    if char_count < PASSWORD_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {PASSWORD_MIN_LENGTH} characters"
        )));
    }

    if char_count > PASSWORD_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "password must not exceed {PASSWORD_MAX_LENGTH} characters"
        )));
    }

    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.iter().any(|entry| *entry == lowered) {
        return Err(AppError::Validation(
            "this password is too common and has appeared in data breaches".to_owned(),
        ));
    }

    Ok(())
}

/// Breached passwords long enough to pass the length check.
static COMMON_PASSWORDS: &[&str] = &[
    "1234567890",
    "qwertyuiop",
    "password12",
    "password123",
    "password1234",
    "iloveyou12",
    "qwerty1234",
    "1q2w3e4r5t",
    "0987654321",
    "1111111111",
    "administrator",
    "letmein123",
    "welcome123",
    "sunshine12",
    "football12",
];
