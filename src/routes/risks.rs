//! Risk routes.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::{self, RequireRiskOwner};
use crate::models::risk::{CreateRisk, Risk};
use crate::services::risk as risk_service;
use crate::AppState;

/// POST /api/v1/risks (Admin, PM or Analyst)
pub async fn create(
    State(state): State<AppState>,
    RequireRiskOwner(user): RequireRiskOwner,
    Json(body): Json<CreateRisk>,
) -> Result<Json<ApiResponse<Risk>>, AppError> {
    let enterprise_id = rbac::enterprise_of(&user)?;
    let scope = rbac::scope_for(&user)?;
    let risk = risk_service::create(&state.db, scope, enterprise_id, &body).await?;
    Ok(ApiResponse::success(risk))
}
