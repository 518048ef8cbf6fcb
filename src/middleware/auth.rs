//! Bearer-token session extractors for Axum handlers.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::errors::AppError;
use crate::models::user::{SessionUser, UserRole};
use crate::services::auth::{self as auth_service, Claims};
use crate::AppState;

/// Authenticated caller, decoded from the `Authorization: Bearer` header.
///
/// ```ignore
/// async fn handler(current_user: CurrentUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
    pub enterprise_id: Option<i64>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.user_id,
            username: claims.sub,
            role: claims.role,
            enterprise_id: claims.enterprise_id,
        }
    }
}

impl From<CurrentUser> for SessionUser {
    fn from(user: CurrentUser) -> Self {
        SessionUser::Authenticated {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::Unauthorized)?;

        let claims = auth_service::validate_token(bearer.token(), &state.config.jwt_secret)?;
        Ok(CurrentUser::from(claims))
    }
}

/// Never rejects: callers without a valid token are [`SessionUser::Guest`].
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser::from_request_parts(parts, state)
            .await
            .map(SessionUser::from)
            .unwrap_or(SessionUser::Guest))
    }
}
