//! Admin user management: directory and headcounts.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::{self, RequireAdmin};
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::user::{UserResponse, UserStats};
use crate::services::{dashboard, user as user_service};
use crate::AppState;

/// GET /api/v1/admin/users
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<PagedResult<UserResponse>>>, AppError> {
    let enterprise_id = rbac::enterprise_of(&admin)?;
    let users = user_service::list_for_enterprise(&state.db, enterprise_id, &pagination).await?;
    Ok(ApiResponse::success(users))
}

/// GET /api/v1/admin/users/stats
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<ApiResponse<UserStats>>, AppError> {
    let enterprise_id = rbac::enterprise_of(&admin)?;
    let stats = dashboard::user_stats(state.dashboard.as_ref(), enterprise_id).await;
    Ok(ApiResponse::success(stats))
}
