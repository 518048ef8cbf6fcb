//! Role-keyed dashboard aggregation.
//!
//! [`aggregate`] never fails: store errors, timeouts and empty scopes all
//! produce a complete record whose counts are zero and whose lists are empty.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::activity::ActivityEntry;
use crate::models::label::{tally, LabelCount};
use crate::models::project::{ProjectStatus, ProjectSummary};
use crate::models::risk::{RiskStatus, RiskSummary};
use crate::models::user::{UserRole, UserStats};
use crate::services::histogram::{Histogram, Taxonomy};
use crate::services::store::{degrade, DashboardStore, Scope, ScopeSnapshot, RECENT_LIMIT};
use crate::services::task_status;

/// Display-only business metrics. Not recomputed; carried through as constants.
pub mod placeholders {
    pub const BUDGET_PERCENTAGE: i64 = 17;
    pub const BUDGET_TOTAL: i64 = 245_000;
    pub const BUDGET_SPENT: i64 = 42_500;
    pub const RISK_PERCENTAGE: i64 = 25;
    pub const AVG_COMPLETION: i64 = 12;
}

/// Flat, render-ready dashboard record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub role: UserRole,

    pub total_projects: i64,
    pub active_projects: i64,
    pub hold_projects: i64,
    pub complete_projects: i64,
    pub project_status_breakdown: Histogram,

    pub total_risks: i64,
    pub open_risks: i64,
    pub high_risks: i64,
    pub rag_breakdown: Histogram,

    pub total_vendors: i64,

    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub pending_tasks: i64,
    pub other_tasks: i64,
    pub overdue_tasks: i64,
    pub task_priority_breakdown: Histogram,

    pub recent_projects: Vec<ProjectSummary>,
    pub recent_risks: Vec<RiskSummary>,
    pub recent_activities: Vec<ActivityEntry>,

    pub budget_percentage: i64,
    pub budget_total: i64,
    pub budget_spent: i64,
    pub risk_percentage: i64,
    pub avg_completion: i64,
}

impl DashboardSummary {
    /// The zero record served whenever nothing could be read.
    pub fn empty(role: UserRole) -> Self {
        Self {
            role,
            total_projects: 0,
            active_projects: 0,
            hold_projects: 0,
            complete_projects: 0,
            project_status_breakdown: Histogram::empty(Taxonomy::ProjectStatus),
            total_risks: 0,
            open_risks: 0,
            high_risks: 0,
            rag_breakdown: Histogram::empty(Taxonomy::Rag),
            total_vendors: 0,
            total_tasks: 0,
            completed_tasks: 0,
            pending_tasks: 0,
            other_tasks: 0,
            overdue_tasks: 0,
            task_priority_breakdown: Histogram::empty(Taxonomy::TaskPriority),
            recent_projects: Vec::new(),
            recent_risks: Vec::new(),
            recent_activities: Vec::new(),
            budget_percentage: placeholders::BUDGET_PERCENTAGE,
            budget_total: placeholders::BUDGET_TOTAL,
            budget_spent: placeholders::BUDGET_SPENT,
            risk_percentage: placeholders::RISK_PERCENTAGE,
            avg_completion: placeholders::AVG_COMPLETION,
        }
    }

    /// Fold raw rows into the summary. Pure; `today` drives the overdue count.
    pub fn from_snapshot(role: UserRole, snapshot: ScopeSnapshot, today: NaiveDate) -> Self {
        let ScopeSnapshot {
            project_status_counts,
            risk_rag_counts,
            risk_status_counts,
            high_score_risks,
            vendor_count,
            mut tasks,
            mut recent_projects,
            mut recent_risks,
            mut recent_activities,
        } = snapshot;

        let project_status_breakdown = Histogram::build(Taxonomy::ProjectStatus, &project_status_counts);
        let total_projects = sum_counts(&project_status_counts);
        let active_projects = count_where(&project_status_counts, |label| {
            ProjectStatus::from_label(label).is_some_and(|s| s.is_active())
        });

        let total_risks = sum_counts(&risk_status_counts);
        let resolved_risks = count_where(&risk_status_counts, |label| {
            RiskStatus::from_label(label).is_some_and(|s| s.is_resolved())
        });

        let task_tally = task_status::summarize(&mut tasks, today);
        let priority_counts = tally(tasks.iter().map(|t| t.priority.as_str()));

        let limit = RECENT_LIMIT as usize;
        recent_projects.truncate(limit);
        recent_risks.truncate(limit);
        recent_activities.truncate(limit);

        Self {
            total_projects,
            active_projects,
            hold_projects: project_status_breakdown.get("On Hold"),
            complete_projects: project_status_breakdown.get("Completed"),
            project_status_breakdown,
            total_risks,
            open_risks: total_risks - resolved_risks,
            high_risks: high_score_risks.max(0),
            rag_breakdown: Histogram::build(Taxonomy::Rag, &risk_rag_counts),
            total_vendors: vendor_count.max(0),
            total_tasks: task_tally.total,
            completed_tasks: task_tally.completed,
            pending_tasks: task_tally.pending,
            other_tasks: task_tally.other,
            overdue_tasks: task_tally.overdue,
            task_priority_breakdown: Histogram::build(Taxonomy::TaskPriority, &priority_counts),
            recent_projects,
            recent_risks,
            recent_activities,
            ..Self::empty(role)
        }
    }
}

/// Build the dashboard record for `role`, scoped by `scope_id`.
///
/// `scope_id` is the enterprise id for Admin/Analyst and the user id for PM and
/// Vendor. An id that matches nothing yields the zero record.
pub async fn aggregate(
    store: &dyn DashboardStore,
    role: UserRole,
    scope_id: i64,
    today: NaiveDate,
) -> DashboardSummary {
    let scope = Scope::for_role(role, scope_id);
    let snapshot = degrade(store.load_snapshot(scope).await, "dashboard snapshot");
    let summary = DashboardSummary::from_snapshot(role, snapshot, today);
    tracing::debug!(
        %role,
        scope_id,
        total_projects = summary.total_projects,
        total_risks = summary.total_risks,
        total_tasks = summary.total_tasks,
        "Dashboard aggregated"
    );
    summary
}

/// Headcounts for the admin user-management page; zeros on failure.
pub async fn user_stats(store: &dyn DashboardStore, enterprise_id: i64) -> UserStats {
    degrade(store.load_user_stats(enterprise_id).await, "user stats")
}

fn sum_counts(rows: &[LabelCount]) -> i64 {
    rows.iter().map(|row| row.count.max(0)).sum()
}

fn count_where(rows: &[LabelCount], predicate: impl Fn(&str) -> bool) -> i64 {
    rows.iter()
        .filter(|row| row.label.as_deref().is_some_and(&predicate))
        .map(|row| row.count.max(0))
        .sum()
}
