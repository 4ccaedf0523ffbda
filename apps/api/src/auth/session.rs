use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use switchboard_application::AdminAccount;
use switchboard_core::{AppError, AppResult, SessionIdentity};
use switchboard_domain::Principal;
use tower_sessions::Session;
use tracing::info;

use crate::dto::SessionResponse;
use crate::error::ApiResult;
use crate::state::AppState;

use super::SESSION_USER_KEY;

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    let admin_id = session
        .get::<SessionIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .map(|identity| identity.admin_id());

    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    if let Some(admin_id) = admin_id {
        info!(%admin_id, "admin signed out");
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<SessionResponse>> {
    let account = state.admin_service.current_admin(&principal).await?;
    Ok(Json(session_response(account, &principal)))
}

/// Rotates the session id and stores the signed-in identity.
pub(super) async fn establish_session(session: &Session, account: &AdminAccount) -> AppResult<()> {
    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    let identity = SessionIdentity::new(
        account.id.as_uuid(),
        account.email.as_str(),
        account.display_name.as_str(),
    );
    session
        .insert(SESSION_USER_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })
}

/// Signs the account in and describes the resulting session.
pub(super) async fn sign_in(
    state: &AppState,
    session: &Session,
    account: AdminAccount,
) -> AppResult<SessionResponse> {
    establish_session(session, &account).await?;
    let principal = state
        .authorization_service
        .resolve_principal(account.id)
        .await?;

    Ok(session_response(account, &principal))
}

fn session_response(account: AdminAccount, principal: &Principal) -> SessionResponse {
    SessionResponse {
        admin: account.into(),
        permissions: principal.effective_permissions().names(),
        granted_permissions: principal.granted_permissions().names(),
    }
}
