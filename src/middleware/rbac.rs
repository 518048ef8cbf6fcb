//! Role-based access control extractors and the dashboard role router.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::user::UserRole;
use crate::services::store::Scope;
use crate::AppState;

fn require(user: CurrentUser, allowed: &[UserRole], message: &str) -> Result<CurrentUser, AppError> {
    if allowed.contains(&user.role) {
        Ok(user)
    } else {
        tracing::debug!(user_id = user.id, role = %user.role, "Role not permitted");
        Err(AppError::Forbidden(message.to_string()))
    }
}

/// Extractor that requires the Admin role.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        require(user, &[UserRole::Admin], "Admin access required").map(RequireAdmin)
    }
}

/// Extractor for roles that create projects and tasks: Admin or PM.
#[derive(Debug, Clone)]
pub struct RequirePlanner(pub CurrentUser);

impl FromRequestParts<AppState> for RequirePlanner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        require(
            user,
            &[UserRole::Admin, UserRole::ProjectManager],
            "Admin or project manager access required",
        )
        .map(RequirePlanner)
    }
}

/// Extractor for roles that record risks: Admin, PM or Analyst.
#[derive(Debug, Clone)]
pub struct RequireRiskOwner(pub CurrentUser);

impl FromRequestParts<AppState> for RequireRiskOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        require(
            user,
            &[UserRole::Admin, UserRole::ProjectManager, UserRole::Analyst],
            "Admin, project manager, or analyst access required",
        )
        .map(RequireRiskOwner)
    }
}

/// Breadcrumb entry for page chrome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breadcrumb {
    pub title: String,
    pub url: String,
}

/// Resolve a `/dashboard/{segment}` request against the caller's session role.
///
/// Unknown segments are 404; a segment naming another role is 403.
pub fn authorize_segment(user: &CurrentUser, segment: &str) -> Result<UserRole, AppError> {
    let requested = UserRole::from_segment(segment)
        .ok_or_else(|| AppError::NotFound(format!("No dashboard for '{segment}'")))?;
    if requested != user.role {
        tracing::info!(
            user_id = user.id,
            session_role = %user.role,
            requested_role = %requested,
            "Dashboard role mismatch"
        );
        return Err(AppError::Forbidden(format!(
            "{} access required",
            requested.title()
        )));
    }
    Ok(requested)
}

/// The id that scopes the caller's dashboard reads.
///
/// Enterprise-wide roles need an enterprise on their account; user-scoped
/// roles use their own id.
pub fn scope_id_for(user: &CurrentUser) -> Result<i64, AppError> {
    match user.role {
        UserRole::Admin | UserRole::Analyst => enterprise_of(user),
        UserRole::ProjectManager | UserRole::Vendor => Ok(user.id),
    }
}

/// The caller's enterprise, required for writes and enterprise-wide reads.
pub fn enterprise_of(user: &CurrentUser) -> Result<i64, AppError> {
    user.enterprise_id.ok_or(AppError::ScopeRequired)
}

/// Read scope for the caller's listings.
pub fn scope_for(user: &CurrentUser) -> Result<Scope, AppError> {
    scope_id_for(user).map(|id| Scope::for_role(user.role, id))
}

/// Page identifier the presentation layer renders for a role's dashboard.
pub fn dashboard_page(role: UserRole) -> String {
    format!("{}/dashboard", role.segment())
}

pub fn breadcrumbs(role: UserRole) -> Vec<Breadcrumb> {
    vec![
        Breadcrumb {
            title: "Home".to_string(),
            url: "/".to_string(),
        },
        Breadcrumb {
            title: format!("{} Dashboard", role.title()),
            url: format!("/{}", dashboard_page(role)),
        },
    ]
}
