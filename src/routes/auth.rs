//! Authentication routes: login, profile, session context.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::rbac;
use crate::models::user::{SessionUser, UserResponse};
use crate::services::auth::{self as auth_service, AccessToken};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AccessToken>>, AppError> {
    body.validate()?;
    let token = auth_service::login(
        &state.db,
        &body.email,
        &body.password,
        &state.config.jwt_secret,
        state.config.jwt_access_token_expiry_secs,
    )
    .await?;

    Ok(ApiResponse::success(token))
}

/// GET /api/v1/auth/me: current user profile
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = auth_service::find_user_by_id(&state.db, current_user.id).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}

/// Session context for page chrome: who is calling and where their home page is.
#[derive(Debug, Serialize)]
pub struct SessionContext {
    #[serde(flatten)]
    pub user: SessionUser,
    pub authenticated: bool,
    pub home: String,
}

impl From<SessionUser> for SessionContext {
    fn from(user: SessionUser) -> Self {
        let home = match user.role() {
            Some(role) => format!("/{}", rbac::dashboard_page(role)),
            None => "/login".to_string(),
        };
        Self {
            authenticated: user.is_authenticated(),
            home,
            user,
        }
    }
}

/// GET /api/v1/session: who is calling, or `guest`.
pub async fn session(session: SessionUser) -> Json<ApiResponse<SessionContext>> {
    ApiResponse::success(SessionContext::from(session))
}
