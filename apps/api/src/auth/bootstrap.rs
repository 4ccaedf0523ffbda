use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use subtle::ConstantTimeEq;
use switchboard_application::RegisterAdminParams;
use switchboard_core::AppError;
use tower_sessions::Session;
use tracing::warn;

use crate::dto::{BootstrapRequest, SessionResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::session::sign_in;

/// POST /auth/bootstrap - Creates and signs in the first super admin.
pub async fn bootstrap_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BootstrapRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    if !token_matches(state.bootstrap_token.as_str(), payload.token.as_str()) {
        warn!("bootstrap attempted with an invalid token");
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let account = state
        .admin_service
        .bootstrap_super_admin(RegisterAdminParams {
            email: payload.email,
            password: payload.password,
            display_name: payload.display_name,
        })
        .await?;

    let response = sign_in(&state, &session, account).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Constant-time comparison. An unset token never matches.
fn token_matches(expected: &str, provided: &str) -> bool {
    !expected.is_empty() && bool::from(expected.as_bytes().ct_eq(provided.as_bytes()))
}
