//! Read-only store seam for dashboard aggregation.
//!
//! [`DashboardStore`] is the only path by which dashboards touch the database.
//! The PostgreSQL implementation acquires one pooled connection per call,
//! bounds every statement with the configured timeout, and releases the
//! connection on every exit path when the guard drops.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::activity::ActivityEntry;
use crate::models::label::LabelCount;
use crate::models::project::ProjectSummary;
use crate::models::risk::{RiskSummary, HIGH_RISK_SCORE_THRESHOLD};
use crate::models::task::TaskRecord;
use crate::models::user::{UserRole, UserStats};

/// Rows per recent-activity feed.
pub const RECENT_LIMIT: i64 = 5;

/// Which rows a read may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Everything owned by one enterprise.
    Enterprise(i64),
    /// Projects managed by one PM user.
    ProjectManager(i64),
    /// Projects where one user has tasks assigned.
    Assignee(i64),
}

impl Scope {
    pub fn for_role(role: UserRole, scope_id: i64) -> Self {
        match role {
            UserRole::Admin | UserRole::Analyst => Self::Enterprise(scope_id),
            UserRole::ProjectManager => Self::ProjectManager(scope_id),
            UserRole::Vendor => Self::Assignee(scope_id),
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::Enterprise(id) | Self::ProjectManager(id) | Self::Assignee(id) => *id,
        }
    }

    /// `WHERE` fragment over `projects p`; the scope id binds to `$1`.
    pub(crate) fn project_filter(&self) -> &'static str {
        match self {
            Self::Enterprise(_) => "p.enterprise_id = $1",
            Self::ProjectManager(_) => "p.pm_id = $1",
            Self::Assignee(_) => "p.id IN (SELECT project_id FROM tasks WHERE assigned_to = $1)",
        }
    }

    /// `WHERE` fragment over `risks r`; the scope id binds to `$1`.
    pub(crate) fn risk_filter(&self) -> &'static str {
        match self {
            Self::Enterprise(_) => "r.enterprise_id = $1",
            Self::ProjectManager(_) => "r.project_id IN (SELECT id FROM projects WHERE pm_id = $1)",
            Self::Assignee(_) => {
                "r.project_id IN (SELECT project_id FROM tasks WHERE assigned_to = $1)"
            }
        }
    }

    /// `WHERE` fragment over `tasks t`; the scope id binds to `$1`.
    pub(crate) fn task_filter(&self) -> &'static str {
        match self {
            Self::Enterprise(_) => {
                "t.project_id IN (SELECT id FROM projects WHERE enterprise_id = $1)"
            }
            Self::ProjectManager(_) => "t.project_id IN (SELECT id FROM projects WHERE pm_id = $1)",
            Self::Assignee(_) => "t.assigned_to = $1",
        }
    }
}

/// Failure reading from the store. Never reaches the presentation layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{query} timed out after {after:?}")]
    Timeout { query: &'static str, after: Duration },
}

/// Raw rows read for one scope in one aggregation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeSnapshot {
    pub project_status_counts: Vec<LabelCount>,
    pub risk_rag_counts: Vec<LabelCount>,
    pub risk_status_counts: Vec<LabelCount>,
    pub high_score_risks: i64,
    pub vendor_count: i64,
    pub tasks: Vec<TaskRecord>,
    pub recent_projects: Vec<ProjectSummary>,
    pub recent_risks: Vec<RiskSummary>,
    pub recent_activities: Vec<ActivityEntry>,
}

#[async_trait]
pub trait DashboardStore: Send + Sync + fmt::Debug {
    /// Read every row a dashboard needs for `scope`.
    async fn load_snapshot(&self, scope: Scope) -> Result<ScopeSnapshot, StoreError>;

    /// Headcounts for one enterprise's users.
    async fn load_user_stats(&self, enterprise_id: i64) -> Result<UserStats, StoreError>;
}

/// Map a failed read to the type's default, logging why.
///
/// This is the single place where store failures are absorbed.
pub fn degrade<T: Default>(result: Result<T, StoreError>, context: &'static str) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, context, "Store read failed, serving defaults");
        T::default()
    })
}

/// PostgreSQL-backed [`DashboardStore`].
#[derive(Debug, Clone)]
pub struct PgDashboardStore {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgDashboardStore {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn bounded<T, F>(&self, query: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout {
                query,
                after: self.query_timeout,
            }),
        }
    }
}

#[async_trait]
impl DashboardStore for PgDashboardStore {
    async fn load_snapshot(&self, scope: Scope) -> Result<ScopeSnapshot, StoreError> {
        let mut conn = self.bounded("acquire connection", self.pool.acquire()).await?;
        let id = scope.id();

        let sql = format!(
            "SELECT p.status AS label, COUNT(*) AS count FROM projects p WHERE {} GROUP BY p.status",
            scope.project_filter()
        );
        let project_status_counts = self
            .bounded(
                "project status counts",
                sqlx::query_as::<_, LabelCount>(&sql).bind(id).fetch_all(&mut *conn),
            )
            .await?;

        let sql = format!(
            "SELECT r.rag_status AS label, COUNT(*) AS count FROM risks r WHERE {} GROUP BY r.rag_status",
            scope.risk_filter()
        );
        let risk_rag_counts = self
            .bounded(
                "risk rag counts",
                sqlx::query_as::<_, LabelCount>(&sql).bind(id).fetch_all(&mut *conn),
            )
            .await?;

        let sql = format!(
            "SELECT r.status AS label, COUNT(*) AS count FROM risks r WHERE {} GROUP BY r.status",
            scope.risk_filter()
        );
        let risk_status_counts = self
            .bounded(
                "risk status counts",
                sqlx::query_as::<_, LabelCount>(&sql).bind(id).fetch_all(&mut *conn),
            )
            .await?;

        let sql = format!(
            "SELECT COUNT(*) FROM risks r WHERE {} AND r.risk_score > $2",
            scope.risk_filter()
        );
        let high_score_risks = self
            .bounded(
                "high score risks",
                sqlx::query_scalar::<_, i64>(&sql)
                    .bind(id)
                    .bind(HIGH_RISK_SCORE_THRESHOLD)
                    .fetch_one(&mut *conn),
            )
            .await?;

        let vendor_count = match scope {
            Scope::Enterprise(enterprise_id) => {
                self.bounded(
                    "vendor count",
                    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vendors WHERE enterprise_id = $1")
                        .bind(enterprise_id)
                        .fetch_one(&mut *conn),
                )
                .await?
            }
            _ => 0,
        };

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
        let tasks = self
            .bounded(
                "scoped tasks",
                sqlx::query_as::<_, TaskRecord>(&sql).bind(id).fetch_all(&mut *conn),
            )
            .await?;

        let sql = format!(
            r#"
            SELECT p.id, p.name, p.status, p.budget_total, p.budget_spent, p.created_at
            FROM projects p
            WHERE {}
            ORDER BY p.created_at DESC
            LIMIT $2
            "#,
            scope.project_filter()
        );
        let recent_projects = self
            .bounded(
                "recent projects",
                sqlx::query_as::<_, ProjectSummary>(&sql)
                    .bind(id)
                    .bind(RECENT_LIMIT)
                    .fetch_all(&mut *conn),
            )
            .await?;

        let sql = format!(
            r#"
            SELECT r.id, r.title, r.rag_status, r.risk_score, r.status,
                   COALESCE(p.name, 'No Project') AS project_name, r.created_at
            FROM risks r
            LEFT JOIN projects p ON r.project_id = p.id
            WHERE {}
            ORDER BY r.created_at DESC
            LIMIT $2
            "#,
            scope.risk_filter()
        );
        let recent_risks = self
            .bounded(
                "recent risks",
                sqlx::query_as::<_, RiskSummary>(&sql)
                    .bind(id)
                    .bind(RECENT_LIMIT)
                    .fetch_all(&mut *conn),
            )
            .await?;

        let sql = format!(
            r#"
            SELECT a.action, a.details, a.created_at, u.username
            FROM activities a
            LEFT JOIN users u ON a.user_id = u.id
            WHERE a.project_id IN (SELECT p.id FROM projects p WHERE {})
            ORDER BY a.created_at DESC
            LIMIT $2
            "#,
            scope.project_filter()
        );
        let recent_activities = self
            .bounded(
                "recent activities",
                sqlx::query_as::<_, ActivityEntry>(&sql)
                    .bind(id)
                    .bind(RECENT_LIMIT)
                    .fetch_all(&mut *conn),
            )
            .await?;

        Ok(ScopeSnapshot {
            project_status_counts,
            risk_rag_counts,
            risk_status_counts,
            high_score_risks,
            vendor_count,
            tasks,
            recent_projects,
            recent_risks,
            recent_activities,
        })
    }

    async fn load_user_stats(&self, enterprise_id: i64) -> Result<UserStats, StoreError> {
        let mut conn = self.bounded("acquire connection", self.pool.acquire()).await?;
        self.bounded(
            "user stats",
            sqlx::query_as::<_, UserStats>(
                r#"
                SELECT
                    COUNT(*) AS total_users,
                    COALESCE(SUM(CASE WHEN is_active     THEN 1 ELSE 0 END), 0) AS active_users,
                    COALESCE(SUM(CASE WHEN NOT is_active THEN 1 ELSE 0 END), 0) AS inactive_users,
                    COALESCE(SUM(CASE WHEN role = 'PM'   THEN 1 ELSE 0 END), 0) AS pm_count
                FROM users
                WHERE enterprise_id = $1
                "#,
            )
            .bind(enterprise_id)
            .fetch_one(&mut *conn),
        )
        .await
    }
}
