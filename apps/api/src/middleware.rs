use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use switchboard_core::{AppError, SessionIdentity};
use switchboard_domain::AdminUserId;
use tower_sessions::Session;

use crate::auth::SESSION_USER_KEY;
use crate::error::ApiResult;
use crate::state::AppState;

/// Resolves the session into a [`switchboard_domain::Principal`] request
/// extension. Grants and status are re-read on every request.
pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session
        .get::<SessionIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    let principal = state
        .authorization_service
        .resolve_principal(AdminUserId::from_uuid(identity.admin_id()))
        .await?;

    request.extensions_mut().insert(identity);
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        check_same_origin(request.headers(), state.frontend_url.as_str())?;
    }

    Ok(next.run(request).await)
}

fn check_same_origin(headers: &HeaderMap, allowed_origin: &str) -> Result<(), AppError> {
    if headers.get("sec-fetch-site") == Some(&HeaderValue::from_static("cross-site")) {
        return Err(AppError::Unauthorized("cross-site request blocked".to_owned()));
    }

    let origin = headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if origin != allowed_origin && !referer.starts_with(allowed_origin) {
        return Err(AppError::Unauthorized("origin validation failed".to_owned()));
    }

    Ok(())
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, Method, header};

    use super::{check_same_origin, is_state_changing_method};

    const FRONTEND: &str = "http://localhost:3000";

    fn headers(pairs: &[(header::HeaderName, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(name.clone(), HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn matching_origin_or_referer_is_accepted() {
        assert!(check_same_origin(&headers(&[(header::ORIGIN, FRONTEND)]), FRONTEND).is_ok());
        assert!(
            check_same_origin(
                &headers(&[(header::REFERER, "http://localhost:3000/tasks/42")]),
                FRONTEND
            )
            .is_ok()
        );
    }

    #[test]
    fn foreign_or_missing_origin_is_rejected() {
        assert!(
            check_same_origin(&headers(&[(header::ORIGIN, "https://evil.example")]), FRONTEND)
                .is_err()
        );
        assert!(check_same_origin(&HeaderMap::new(), FRONTEND).is_err());
    }

    #[test]
    fn cross_site_fetch_metadata_wins_over_origin() {
        let mut request_headers = headers(&[(header::ORIGIN, FRONTEND)]);
        request_headers.insert("sec-fetch-site", HeaderValue::from_static("cross-site"));

        assert!(check_same_origin(&request_headers, FRONTEND).is_err());
    }

    #[test]
    fn only_mutating_methods_are_checked() {
        assert!(is_state_changing_method(&Method::DELETE));
        assert!(!is_state_changing_method(&Method::GET));
        assert!(!is_state_changing_method(&Method::OPTIONS));
    }
}
