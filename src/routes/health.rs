//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
}

/// Liveness probe: OK whenever the process is serving.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe: reports database connectivity without failing the request.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let check = tokio::time::timeout(
        state.config.dashboard_query_timeout(),
        sqlx::query("SELECT 1").execute(&state.db),
    )
    .await;

    let (status, database) = match check {
        Ok(Ok(_)) => ("ok", "connected".to_string()),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Database health check failed");
            ("degraded", format!("error: {e}"))
        }
        Err(_) => {
            tracing::warn!("Database health check timed out");
            ("degraded", "error: timed out".to_string())
        }
    };

    ApiResponse::success(HealthStatus {
        status: status.to_string(),
        database,
    })
}
