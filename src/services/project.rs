//! Project service: scoped listing, detail with risks, creation.

use serde::Serialize;
use sqlx::PgPool;
use validator::Validate;

use crate::errors::AppError;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::project::{CreateProject, Project, ProjectStatus};
use crate::models::risk::Risk;
use crate::services::store::Scope;

const PROJECT_COLUMNS: &str = "p.id, p.enterprise_id, p.pm_id, p.name, p.status, p.budget_total, \
     p.budget_spent, p.team_size, p.start_date, p.end_date, p.created_at";

/// Project with the risks attached to it, for the detail view.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub risks: Vec<Risk>,
}

/// List projects visible in `scope`, newest first.
pub async fn list(
    pool: &PgPool,
    scope: Scope,
    pagination: &Pagination,
) -> Result<PagedResult<Project>, AppError> {
    let count_sql = format!("SELECT COUNT(*) FROM projects p WHERE {}", scope.project_filter());
    let total = sqlx::query_scalar::<_, i64>(&count_sql)
        .bind(scope.id())
        .fetch_one(pool)
        .await?;

    let sql = format!(
        "SELECT {PROJECT_COLUMNS} FROM projects p WHERE {} ORDER BY p.created_at DESC LIMIT $2 OFFSET $3",
        scope.project_filter()
    );
    let items = sqlx::query_as::<_, Project>(&sql)
        .bind(scope.id())
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(pool)
        .await?;

    Ok(PagedResult::new(items, total, pagination))
}

/// Fetch one project if it is visible in `scope`.
pub async fn find_in_scope(pool: &PgPool, scope: Scope, id: i64) -> Result<Project, AppError> {
    let sql = format!(
        "SELECT {PROJECT_COLUMNS} FROM projects p WHERE p.id = $2 AND {}",
        scope.project_filter()
    );
    sqlx::query_as::<_, Project>(&sql)
        .bind(scope.id())
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
}

/// Project plus its risks, newest risk first.
pub async fn detail(pool: &PgPool, scope: Scope, id: i64) -> Result<ProjectDetail, AppError> {
    let project = find_in_scope(pool, scope, id).await?;
    let risks = sqlx::query_as::<_, Risk>(
        r#"
        SELECT id, enterprise_id, project_id, title, rag_status, risk_score, status, created_at
        FROM risks
        WHERE project_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(project.id)
    .fetch_all(pool)
    .await?;

    Ok(ProjectDetail { project, risks })
}

/// Create a project in `enterprise_id`, owned by `pm_id`, and log it to the
/// activity feed under `actor_id`.
pub async fn create(
    pool: &PgPool,
    enterprise_id: i64,
    pm_id: i64,
    actor_id: i64,
    input: &CreateProject,
) -> Result<Project, AppError> {
    input.validate()?;
    if !input.dates_in_order() {
        return Err(AppError::Validation(
            "end_date must not be before start_date".to_string(),
        ));
    }

    let pm_in_enterprise: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND enterprise_id = $2 AND role = 'PM' AND is_active)",
    )
    .bind(pm_id)
    .bind(enterprise_id)
    .fetch_one(pool)
    .await?;
    if !pm_in_enterprise {
        return Err(AppError::Validation(
            "pm_id must reference an active project manager in this enterprise".to_string(),
        ));
    }

    let status = input.status.unwrap_or(ProjectStatus::Planning);
    let mut tx = pool.begin().await?;
    let project = sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (enterprise_id, pm_id, name, status, budget_total, team_size, start_date, end_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, enterprise_id, pm_id, name, status, budget_total, budget_spent,
                  team_size, start_date, end_date, created_at
        "#,
    )
    .bind(enterprise_id)
    .bind(pm_id)
    .bind(input.name.trim())
    .bind(status.as_label())
    .bind(input.budget_total.unwrap_or(0.0))
    .bind(input.team_size)
    .bind(input.start_date)
    .bind(input.end_date)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::Conflict(format!("Project '{}' already exists", input.name.trim()))
        }
        other => AppError::Database(other),
    })?;

    sqlx::query(
        "INSERT INTO activities (project_id, user_id, action, details) VALUES ($1, $2, $3, $4)",
    )
    .bind(project.id)
    .bind(actor_id)
    .bind("Created project")
    .bind(&project.name)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(project_id = project.id, enterprise_id, pm_id, "Project created");
    Ok(project)
}
