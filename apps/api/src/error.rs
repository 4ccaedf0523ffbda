use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use switchboard_core::AppError;
use tracing::error;
use ts_rs::TS;

/// API error payload.
///
/// Permission fields are only present on gate denials.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    required_permissions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    user_permissions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    missing_permissions: Option<Vec<String>>,
}

impl ErrorResponse {
    fn message(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            required_permissions: None,
            user_permissions: None,
            missing_permissions: None,
        }
    }
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, payload) = match self.0 {
            AppError::Unauthorized(_) => {
                (StatusCode::UNAUTHORIZED, ErrorResponse::message("Unauthorized"))
            }
            AppError::PermissionDenied(denial) => {
                let denial = *denial;
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse {
                        success: false,
                        error: denial.message,
                        required_permissions: Some(denial.required),
                        user_permissions: Some(denial.granted),
                        missing_permissions: Some(denial.missing),
                    },
                )
            }
            AppError::Forbidden(message) => {
                (StatusCode::FORBIDDEN, ErrorResponse::message(message))
            }
            AppError::InvalidTransition(message) | AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::message(message))
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, ErrorResponse::message(message)),
            AppError::Conflict(message) => (StatusCode::CONFLICT, ErrorResponse::message(message)),
            AppError::Internal(message) => {
                error!(error = %message, "request failed with an internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::message("Internal server error"),
                )
            }
        };

        (status, Json(payload)).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::{Value, json};
    use switchboard_core::{AppError, PermissionDenial};

    use super::ApiError;

    async fn render(error: AppError) -> (StatusCode, Value) {
        let response = ApiError(error).into_response();
        let status = response.status();
        let body = match axum::body::to_bytes(response.into_body(), usize::MAX).await {
            Ok(body) => body,
            Err(error) => panic!("error body should be readable: {error}"),
        };
        let payload = match serde_json::from_slice::<Value>(&body) {
            Ok(payload) => payload,
            Err(error) => panic!("error body should be JSON: {error}"),
        };

        (status, payload)
    }

    #[tokio::test]
    async fn unauthorized_uses_fixed_message() {
        let (status, payload) =
            render(AppError::Unauthorized("session expired".to_owned())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(payload, json!({ "success": false, "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn permission_denial_carries_permission_lists() {
        let (status, payload) = render(AppError::PermissionDenied(Box::new(PermissionDenial {
            message: "missing permissions [USER_MANAGE]".to_owned(),
            required: vec!["USER_CREATE".to_owned(), "USER_MANAGE".to_owned()],
            granted: vec!["USER_CREATE".to_owned()],
            missing: vec!["USER_MANAGE".to_owned()],
        })))
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            payload,
            json!({
                "success": false,
                "error": "missing permissions [USER_MANAGE]",
                "requiredPermissions": ["USER_CREATE", "USER_MANAGE"],
                "userPermissions": ["USER_CREATE"],
                "missingPermissions": ["USER_MANAGE"],
            })
        );
    }

    #[tokio::test]
    async fn lifecycle_errors_map_to_client_statuses() {
        let cases = [
            (AppError::Forbidden("not the assignee".to_owned()), StatusCode::FORBIDDEN),
            (
                AppError::InvalidTransition("task is not pending".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::NotFound("task".to_owned()), StatusCode::NOT_FOUND),
            (AppError::Conflict("stale version".to_owned()), StatusCode::CONFLICT),
        ];

        for (error, expected) in cases {
            let (status, payload) = render(error).await;
            assert_eq!(status, expected);
            assert_eq!(payload["success"], json!(false));
            assert!(payload.get("missingPermissions").is_none());
        }
    }

    #[tokio::test]
    async fn internal_errors_are_not_leaked() {
        let (status, payload) =
            render(AppError::Internal("connection refused at 10.0.0.5".to_owned())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(payload["error"], json!("Internal server error"));
    }
}
