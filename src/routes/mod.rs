//! Route definitions for the Risk Sentinel API.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod projects;
pub mod risks;
pub mod tasks;
pub mod users;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::AppState;

/// Largest accepted JSON request body.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Assemble the full application router.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    let auth_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/session", get(auth::session));

    let dashboard_routes = Router::new()
        .route("/dashboard", get(dashboard::own))
        .route("/dashboard/{role}", get(dashboard::for_role))
        .route("/admin/reports", get(dashboard::reports))
        .route("/admin/users", get(users::list))
        .route("/admin/users/stats", get(users::stats));

    let project_routes = Router::new()
        .route("/projects", get(projects::list).post(projects::create))
        .route("/projects/{id}", get(projects::get_by_id))
        .route("/risks", post(risks::create))
        .route("/tasks", get(tasks::list).post(tasks::create));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", auth_routes)
        .nest("/api/v1", dashboard_routes)
        .nest("/api/v1", project_routes)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!(error = %e, url = %config.frontend_url, "Invalid FRONTEND_URL, allowing any origin");
            layer.allow_origin(Any)
        }
    }
}
