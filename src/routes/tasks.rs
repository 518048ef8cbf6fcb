//! Task routes: enriched listing and creation.

use axum::{extract::State, Json};
use chrono::Utc;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::{self, RequirePlanner};
use crate::models::task::{CreateTask, Task};
use crate::services::task::{self as task_service, TaskList};
use crate::AppState;

/// GET /api/v1/tasks: tasks in the caller's scope with due-date text and overdue flags.
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<TaskList>>, AppError> {
    let scope = rbac::scope_for(&user)?;
    let tasks = task_service::list(&state.db, scope, Utc::now().date_naive()).await?;
    Ok(ApiResponse::success(tasks))
}

/// POST /api/v1/tasks (PM or Admin)
pub async fn create(
    State(state): State<AppState>,
    RequirePlanner(user): RequirePlanner,
    Json(body): Json<CreateTask>,
) -> Result<Json<ApiResponse<Task>>, AppError> {
    let scope = rbac::scope_for(&user)?;
    let task = task_service::create(&state.db, scope, &body).await?;
    Ok(ApiResponse::success(task))
}
