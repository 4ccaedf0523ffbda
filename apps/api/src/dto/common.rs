use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use switchboard_core::{AppError, AppResult};
use ts_rs::TS;

/// Default page size for list endpoints.
pub(crate) const DEFAULT_PAGE_SIZE: usize = 50;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// Parses an optional transport value, treating blank input as absent.
pub(crate) fn parse_optional<T>(value: Option<String>) -> AppResult<Option<T>>
where
    T: FromStr<Err = AppError>,
{
    value
        .filter(|value| !value.trim().is_empty())
        .map(|value| T::from_str(value.trim()))
        .transpose()
}

pub(crate) fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}
