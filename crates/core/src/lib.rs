//! Shared primitives for all Rust crates in Switchboard.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::SessionIdentity;

/// Result type used across Switchboard crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string. Surrounding whitespace is trimmed.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Structured detail for a rejected permission check.
///
/// Carries stable permission names so transports can explain exactly which
/// grants were required and which ones are missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionDenial {
    /// Human-readable rejection message.
    pub message: String,
    /// Permission names declared by the operation.
    pub required: Vec<String>,
    /// Permission names currently held by the principal.
    pub granted: Vec<String>,
    /// Required permission names the principal does not hold.
    pub missing: Vec<String>,
}

impl std::fmt::Display for PermissionDenial {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.message.as_str())
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// No authenticated principal could be resolved.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Principal resolved but lacks the permissions an operation declares.
    #[error("forbidden: {0}")]
    PermissionDenied(Box<PermissionDenial>),

    /// Principal is authenticated but not allowed to act on this resource.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Requested state change is not legal from the current state.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
