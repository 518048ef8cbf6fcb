//! Risk service: creation within the caller's scope.

use sqlx::PgPool;
use validator::Validate;

use crate::errors::AppError;
use crate::models::risk::{CreateRisk, Risk, RiskStatus};
use crate::services::project;
use crate::services::store::Scope;

/// Record a risk for `enterprise_id`. A referenced project must be visible in `scope`.
pub async fn create(
    pool: &PgPool,
    scope: Scope,
    enterprise_id: i64,
    input: &CreateRisk,
) -> Result<Risk, AppError> {
    input.validate()?;
    if let Some(project_id) = input.project_id {
        let project = project::find_in_scope(pool, scope, project_id).await?;
        if project.enterprise_id != enterprise_id {
            return Err(AppError::NotFound("Project not found".to_string()));
        }
    }

    let status = input.status.unwrap_or(RiskStatus::Identified);
    let risk = sqlx::query_as::<_, Risk>(
        r#"
        INSERT INTO risks (enterprise_id, project_id, title, rag_status, risk_score, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, enterprise_id, project_id, title, rag_status, risk_score, status, created_at
        "#,
    )
    .bind(enterprise_id)
    .bind(input.project_id)
    .bind(input.title.trim())
    .bind(input.rag_status.as_label())
    .bind(input.risk_score)
    .bind(status.as_label())
    .fetch_one(pool)
    .await?;

    tracing::info!(risk_id = risk.id, project_id = ?risk.project_id, "Risk recorded");
    Ok(risk)
}
