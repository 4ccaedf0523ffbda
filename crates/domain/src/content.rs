use std::str::FromStr;

use serde::{Deserialize, Serialize};
use switchboard_core::AppError;

uuid_identifier!(
    /// Unique identifier for a posted content item.
    ContentId
);

uuid_identifier!(
    /// Unique identifier for a content report.
    ReportId
);

/// Visibility state of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    /// Submitted and waiting for a moderator.
    PendingReview,
    /// Visible on the platform.
    Published,
    /// Hidden from feeds but retained.
    Hidden,
    /// Taken down for policy violation.
    Removed,
}

impl ContentStatus {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingReview => "pending_review",
            Self::Published => "published",
            Self::Hidden => "hidden",
            Self::Removed => "removed",
        }
    }
}

impl FromStr for ContentStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending_review" => Ok(Self::PendingReview),
            "published" => Ok(Self::Published),
            "hidden" => Ok(Self::Hidden),
            "removed" => Ok(Self::Removed),
            _ => Err(AppError::Validation(format!(
                "unknown content status '{value}'"
            ))),
        }
    }
}

/// Moderator decision applied to a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationDecision {
    /// Make the content visible.
    Publish,
    /// Hide the content without removing it.
    Hide,
    /// Remove the content for policy violation.
    Remove,
}

impl ModerationDecision {
    /// Returns the content status this decision produces.
    #[must_use]
    pub fn resulting_status(&self) -> ContentStatus {
        match self {
            Self::Publish => ContentStatus::Published,
            Self::Hide => ContentStatus::Hidden,
            Self::Remove => ContentStatus::Removed,
        }
    }

    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Hide => "hide",
            Self::Remove => "remove",
        }
    }
}

impl FromStr for ModerationDecision {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "publish" => Ok(Self::Publish),
            "hide" => Ok(Self::Hide),
            "remove" => Ok(Self::Remove),
            _ => Err(AppError::Validation(format!(
                "unknown moderation decision '{value}'"
            ))),
        }
    }
}

/// Handling state of a content report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Waiting for a moderator.
    Open,
    /// Acted upon.
    Resolved,
    /// Closed without action.
    Dismissed,
}

impl ReportStatus {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Resolved => "resolved",
            Self::Dismissed => "dismissed",
        }
    }
}

impl FromStr for ReportStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(Self::Open),
            "resolved" => Ok(Self::Resolved),
            "dismissed" => Ok(Self::Dismissed),
            _ => Err(AppError::Validation(format!(
                "unknown report status '{value}'"
            ))),
        }
    }
}

/// Closing outcome chosen for an open report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportResolution {
    /// The report was valid and acted upon.
    Resolve,
    /// The report was not actionable.
    Dismiss,
}

impl ReportResolution {
    /// Returns the report status this resolution produces.
    #[must_use]
    pub fn resulting_status(&self) -> ReportStatus {
        match self {
            Self::Resolve => ReportStatus::Resolved,
            Self::Dismiss => ReportStatus::Dismissed,
        }
    }
}

impl FromStr for ReportResolution {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "resolve" => Ok(Self::Resolve),
            "dismiss" => Ok(Self::Dismiss),
            _ => Err(AppError::Validation(format!(
                "unknown report resolution '{value}'"
            ))),
        }
    }
}
