pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use sqlx::PgPool;

use crate::services::store::{DashboardStore, PgDashboardStore};

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: config::AppConfig,
    pub dashboard: Arc<dyn DashboardStore>,
}

impl AppState {
    /// State backed by Postgres for both CRUD and dashboard reads.
    pub fn new(db: PgPool, config: config::AppConfig) -> Self {
        let dashboard = Arc::new(PgDashboardStore::new(
            db.clone(),
            config.dashboard_query_timeout(),
        ));
        Self {
            db,
            config,
            dashboard,
        }
    }
}
