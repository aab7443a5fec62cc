use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;
use vulcan_core::AppError;

use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;

pub fn build_router(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<PostgresStore>,
) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route(
            "/api/memberships",
            post(handlers::memberships::create_membership_handler),
        )
        .route(
            "/api/memberships/{membership_id}",
            put(handlers::memberships::update_membership_handler)
                .delete(handlers::memberships::delete_membership_handler),
        )
        .route(
            "/api/projects/{project_id}/memberships",
            get(handlers::memberships::list_project_memberships_handler),
        )
        .route(
            "/api/components/{component_id}/memberships",
            get(handlers::memberships::list_component_memberships_handler),
        )
        .route(
            "/api/projects/{project_id}/effective-role",
            get(handlers::effective_role::project_effective_role_handler),
        )
        .route(
            "/api/components/{component_id}/effective-role",
            get(handlers::effective_role::component_effective_role_handler),
        )
        .route(
            "/api/rules/{rule_id}",
            get(handlers::rules::get_rule_handler)
                .put(handlers::rules::update_rule_handler)
                .delete(handlers::rules::delete_rule_handler),
        )
        .route(
            "/api/rules/{rule_id}/unlock",
            post(handlers::rules::unlock_rule_handler),
        )
        .route(
            "/api/rules/{rule_id}/effective-role",
            get(handlers::effective_role::rule_effective_role_handler),
        )
        .route_layer(from_fn(middleware::require_auth));

    let cors_layer = cors::build_cors_layer(frontend_url)?;

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/bootstrap", post(auth::bootstrap_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state))
}
