use std::str::FromStr;

use serde::{Deserialize, Serialize};
use switchboard_core::{AppError, AppResult};

uuid_identifier!(
    /// Unique identifier for an end-user profile on the platform.
    EndUserId
);

/// Moderation standing of an end-user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndUserStatus {
    /// Account in good standing.
    Active,
    /// Temporarily blocked from posting.
    Suspended,
    /// Permanently blocked.
    Banned,
}

impl EndUserStatus {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Banned => "banned",
        }
    }
}

impl FromStr for EndUserStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            "banned" => Ok(Self::Banned),
            _ => Err(AppError::Validation(format!(
                "unknown end-user status '{value}'"
            ))),
        }
    }
}

/// Platform handle: 3-30 characters of lowercase ASCII letters, digits, `_` or `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Creates a validated, lower-cased username.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into().trim().to_lowercase();
        let length = value.chars().count();

        if !(3..=30).contains(&length) {
            return Err(AppError::Validation(
                "username must be between 3 and 30 characters".to_owned(),
            ));
        }

        if !value
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || matches!(character, '_' | '.'))
        {
            return Err(AppError::Validation(format!(
                "username '{value}' may only contain letters, digits, '_' and '.'"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the validated username.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::{EndUserStatus, Username};
    use std::str::FromStr;

    #[test]
    fn username_is_normalized() {
        let username = Username::new(" Night.Owl_42 ");
        assert_eq!(
            username.as_ref().map(Username::as_str).ok(),
            Some("night.owl_42")
        );
    }

    #[test]
    fn username_rejects_spaces_and_short_values() {
        assert!(Username::new("no spaces").is_err());
        assert!(Username::new("ab").is_err());
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(EndUserStatus::from_str("shadowbanned").is_err());
    }
}
