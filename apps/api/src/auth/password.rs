use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use switchboard_application::{LoginOutcome, RegisterAdminParams};
use switchboard_core::AppError;
use tower_sessions::Session;
use tracing::info;

use crate::dto::{AdminResponse, LoginRequest, RegisterRequest, SessionResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::session::sign_in;

/// POST /auth/register - Self-registration; the account waits for approval.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AdminResponse>)> {
    let account = state
        .admin_service
        .register(RegisterAdminParams {
            email: payload.email,
            password: payload.password,
            display_name: payload.display_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// POST /auth/login - Authenticate with email+password.
pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let outcome = state
        .admin_service
        .login(&payload.email, &payload.password)
        .await?;

    let account = match outcome {
        LoginOutcome::Authenticated(account) => account,
        // Same answer for unknown, wrong-password, pending and disabled accounts.
        LoginOutcome::Failed => {
            return Err(AppError::Unauthorized("invalid email or password".to_owned()).into());
        }
    };

    let admin_id = account.id;
    let response = sign_in(&state, &session, account).await?;
    info!(%admin_id, "admin signed in");

    Ok(Json(response))
}
