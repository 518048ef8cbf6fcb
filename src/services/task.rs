//! Task service: scoped, enriched listing and creation.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use validator::Validate;

use crate::errors::AppError;
use crate::models::task::{CreateTask, Task, TaskPriority, TaskRecord, TaskStatus};
use crate::services::project;
use crate::services::store::Scope;
use crate::services::task_status::{self, TaskTally};

/// Enriched tasks plus their tally.
#[derive(Debug, Serialize)]
pub struct TaskList {
    pub tasks: Vec<TaskRecord>,
    pub summary: TaskTally,
}

/// All tasks visible in `scope`, soonest due first, with overdue flags against `today`.
pub async fn list(pool: &PgPool, scope: Scope, today: NaiveDate) -> Result<TaskList, AppError> {
    let sql = format!(
        r#"
        SELECT t.id, t.project_id, t.assigned_to, t.title, t.status, t.priority,
               t.due_date::text AS due_date
        FROM tasks t
        WHERE {}
        ORDER BY t.due_date NULLS LAST, t.id
        "#,
        scope.task_filter()
    );
    let mut tasks = sqlx::query_as::<_, TaskRecord>(&sql)
        .bind(scope.id())
        .fetch_all(pool)
        .await?;

    let summary = task_status::summarize(&mut tasks, today);
    Ok(TaskList { tasks, summary })
}

/// Create a task on a project visible in `scope`.
pub async fn create(pool: &PgPool, scope: Scope, input: &CreateTask) -> Result<Task, AppError> {
    input.validate()?;
    let project = project::find_in_scope(pool, scope, input.project_id).await?;

    if let Some(assignee) = input.assigned_to {
        let assignable: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND enterprise_id = $2 AND is_active)",
        )
        .bind(assignee)
        .bind(project.enterprise_id)
        .fetch_one(pool)
        .await?;
        if !assignable {
            return Err(AppError::Validation(
                "assigned_to must reference an active user in the project's enterprise".to_string(),
            ));
        }
    }

    let task = sqlx::query_as::<_, Task>(
        r#"
        INSERT INTO tasks (project_id, assigned_to, title, status, priority, due_date)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, project_id, assigned_to, title, status, priority, due_date, created_at
        "#,
    )
    .bind(project.id)
    .bind(input.assigned_to)
    .bind(input.title.trim())
    .bind(input.status.unwrap_or(TaskStatus::NotStarted).as_label())
    .bind(input.priority.unwrap_or(TaskPriority::Medium).as_label())
    .bind(input.due_date)
    .fetch_one(pool)
    .await?;

    tracing::info!(task_id = task.id, project_id = task.project_id, "Task created");
    Ok(task)
}
