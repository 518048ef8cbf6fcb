//! Project routes: scoped listing, detail, creation.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac::{self, RequirePlanner};
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::project::{CreateProject, Project};
use crate::models::user::UserRole;
use crate::services::project::{self as project_service, ProjectDetail};
use crate::AppState;

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<PagedResult<Project>>>, AppError> {
    let scope = rbac::scope_for(&user)?;
    let result = project_service::list(&state.db, scope, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProjectDetail>>, AppError> {
    let scope = rbac::scope_for(&user)?;
    let detail = project_service::detail(&state.db, scope, id).await?;
    Ok(ApiResponse::success(detail))
}

/// POST /api/v1/projects (PM or Admin)
pub async fn create(
    State(state): State<AppState>,
    RequirePlanner(user): RequirePlanner,
    Json(body): Json<CreateProject>,
) -> Result<Json<ApiResponse<Project>>, AppError> {
    let enterprise_id = rbac::enterprise_of(&user)?;
    let pm_id = project_owner(&user, body.pm_id)?;
    let project = project_service::create(&state.db, enterprise_id, pm_id, user.id, &body).await?;
    Ok(ApiResponse::success(project))
}

/// PMs own what they create; admins must name the PM.
fn project_owner(user: &CurrentUser, requested: Option<i64>) -> Result<i64, AppError> {
    match (user.role, requested) {
        (UserRole::ProjectManager, None) => Ok(user.id),
        (UserRole::ProjectManager, Some(id)) if id == user.id => Ok(id),
        (UserRole::ProjectManager, Some(_)) => Err(AppError::Forbidden(
            "Project managers can only create their own projects".to_string(),
        )),
        (_, Some(id)) => Ok(id),
        (_, None) => Err(AppError::Validation("pm_id is required".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: 11,
            username: "planner".to_string(),
            role,
            enterprise_id: Some(1),
        }
    }

    #[test]
    fn pm_owns_own_project() {
        let pm = user(UserRole::ProjectManager);
        assert_eq!(project_owner(&pm, None).unwrap(), 11);
        assert_eq!(project_owner(&pm, Some(11)).unwrap(), 11);
        assert!(matches!(
            project_owner(&pm, Some(12)),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn admin_must_name_pm() {
        let admin = user(UserRole::Admin);
        assert_eq!(project_owner(&admin, Some(12)).unwrap(), 12);
        assert!(matches!(
            project_owner(&admin, None),
            Err(AppError::Validation(_))
        ));
    }
}
