use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use switchboard_domain::{Principal, ReportId};

use crate::dto::{ListReportsQuery, ReportResponse, ResolveReportRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_reports_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListReportsQuery>,
) -> ApiResult<Json<Vec<ReportResponse>>> {
    let reports = state
        .report_service
        .list_reports(&principal, query.into_query()?)
        .await?
        .into_iter()
        .map(ReportResponse::from)
        .collect();

    Ok(Json(reports))
}

pub async fn resolve_report_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(report_id): Path<String>,
    Json(payload): Json<ResolveReportRequest>,
) -> ApiResult<Json<ReportResponse>> {
    let report_id = ReportId::parse(report_id.as_str())?;
    let resolution = payload.resolution()?;
    let report = state
        .report_service
        .resolve_report(&principal, report_id, resolution, payload.notes)
        .await?;

    Ok(Json(report.into()))
}
