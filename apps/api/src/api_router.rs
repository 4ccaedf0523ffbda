use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use switchboard_core::AppError;
use tower_http::trace::TraceLayer;
use tower_sessions::service::SignedCookie;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;

use cors::build_cors_layer;

pub fn build_router<S: SessionStore + Clone>(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<S, SignedCookie>,
) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route(
            "/api/admins",
            get(handlers::admins::list_admins_handler).post(handlers::admins::create_admin_handler),
        )
        .route(
            "/api/admins/{admin_id}",
            get(handlers::admins::get_admin_handler)
                .put(handlers::admins::update_admin_handler)
                .delete(handlers::admins::delete_admin_handler),
        )
        .route(
            "/api/admins/{admin_id}/approve",
            post(handlers::admins::approve_admin_handler),
        )
        .route(
            "/api/admins/{admin_id}/role",
            put(handlers::admins::update_admin_role_handler),
        )
        .route(
            "/api/admins/{admin_id}/disable",
            post(handlers::admins::disable_admin_handler),
        )
        .route(
            "/api/admins/{admin_id}/permissions",
            get(handlers::permissions::admin_permissions_handler)
                .put(handlers::permissions::replace_admin_permissions_handler),
        )
        .route(
            "/api/permissions",
            get(handlers::permissions::list_permission_catalog_handler),
        )
        .route(
            "/api/users",
            get(handlers::users::list_end_users_handler)
                .post(handlers::users::create_end_user_handler),
        )
        .route(
            "/api/users/{end_user_id}",
            get(handlers::users::get_end_user_handler)
                .put(handlers::users::update_end_user_handler)
                .delete(handlers::users::delete_end_user_handler),
        )
        .route(
            "/api/users/{end_user_id}/status",
            put(handlers::users::update_end_user_status_handler),
        )
        .route(
            "/api/users/{end_user_id}/assignment",
            put(handlers::users::assign_end_user_handler),
        )
        .route("/api/content", get(handlers::content::list_content_handler))
        .route(
            "/api/content/{content_id}",
            get(handlers::content::get_content_handler)
                .put(handlers::content::update_content_handler)
                .delete(handlers::content::delete_content_handler),
        )
        .route(
            "/api/content/{content_id}/moderation",
            post(handlers::content::moderate_content_handler),
        )
        .route("/api/reports", get(handlers::reports::list_reports_handler))
        .route(
            "/api/reports/{report_id}/resolution",
            post(handlers::reports::resolve_report_handler),
        )
        .route(
            "/api/tasks",
            get(handlers::tasks::list_tasks_handler).post(handlers::tasks::create_task_handler),
        )
        .route(
            "/api/tasks/{task_id}",
            get(handlers::tasks::get_task_handler).delete(handlers::tasks::delete_task_handler),
        )
        .route(
            "/api/tasks/{task_id}/transition",
            post(handlers::tasks::transition_task_handler),
        )
        .route(
            "/api/activity",
            get(handlers::activity::list_activity_handler),
        )
        .route_layer(from_fn_with_state(app_state.clone(), middleware::require_auth));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/bootstrap", post(auth::bootstrap_handler))
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler));

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(frontend_url)?)
        .layer(session_layer)
        .with_state(app_state))
}
