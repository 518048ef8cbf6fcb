//! Dashboard routes: the role router and admin reports.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::{self, Breadcrumb, RequireAdmin};
use crate::models::user::UserRole;
use crate::services::dashboard::{self, DashboardSummary};
use crate::AppState;

/// Dashboard record plus the page chrome for its role.
#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub page: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    #[serde(flatten)]
    pub summary: DashboardSummary,
}

async fn render(
    state: &AppState,
    user: &CurrentUser,
    role: UserRole,
) -> Result<DashboardPage, AppError> {
    let scope_id = rbac::scope_id_for(user)?;
    let today = Utc::now().date_naive();
    let summary = dashboard::aggregate(state.dashboard.as_ref(), role, scope_id, today).await;

    Ok(DashboardPage {
        page: rbac::dashboard_page(role),
        breadcrumbs: rbac::breadcrumbs(role),
        summary,
    })
}

/// GET /api/v1/dashboard: the caller's own dashboard.
pub async fn own(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<DashboardPage>>, AppError> {
    let page = render(&state, &user, user.role).await?;
    Ok(ApiResponse::success(page))
}

/// GET /api/v1/dashboard/{role}: 403 unless `role` is the caller's.
pub async fn for_role(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(segment): Path<String>,
) -> Result<Json<ApiResponse<DashboardPage>>, AppError> {
    let role = rbac::authorize_segment(&user, &segment)?;
    let page = render(&state, &user, role).await?;
    Ok(ApiResponse::success(page))
}

/// GET /api/v1/admin/reports
pub async fn reports(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<ApiResponse<DashboardPage>>, AppError> {
    let page = render(&state, &admin, UserRole::Admin).await?;
    Ok(ApiResponse::success(page))
}
