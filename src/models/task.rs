//! Task model with status and priority taxonomies.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::label::normalize;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskStatus {
    #[serde(rename = "Not Started", alias = "NotStarted")]
    NotStarted,
    #[serde(rename = "In Progress", alias = "InProgress")]
    InProgress,
    Testing,
    Completed,
}

impl TaskStatus {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Testing => "Testing",
            Self::Completed => "Completed",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match normalize(label).as_str() {
            "notstarted" => Some(Self::NotStarted),
            "inprogress" => Some(Self::InProgress),
            "testing" => Some(Self::Testing),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Work that is started or queued but not done.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::NotStarted | Self::InProgress | Self::Testing)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl TaskPriority {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Task row as read for listings and dashboards.
///
/// `due_date` is kept as raw text so a malformed value degrades per task
/// instead of failing the whole read. The two trailing fields are filled in by
/// [`crate::services::task_status::summarize`].
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct TaskRecord {
    pub id: i64,
    pub project_id: i64,
    pub assigned_to: Option<i64>,
    pub title: String,
    pub status: String,
    pub priority: String,
    pub due_date: Option<String>,
    #[sqlx(skip)]
    pub due_date_formatted: String,
    #[sqlx(skip)]
    pub is_overdue: bool,
}

impl TaskRecord {
    /// Build an unenriched record; used by fixtures and the seed binary.
    pub fn new(id: i64, title: &str, status: &str, priority: &str, due_date: Option<&str>) -> Self {
        Self {
            id,
            project_id: 0,
            assigned_to: None,
            title: title.to_string(),
            status: status.to_string(),
            priority: priority.to_string(),
            due_date: due_date.map(str::to_string),
            due_date_formatted: String::new(),
            is_overdue: false,
        }
    }

    pub fn parsed_status(&self) -> Option<TaskStatus> {
        TaskStatus::from_label(&self.status)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    pub project_id: i64,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub assigned_to: Option<i64>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
}

/// Persisted task as returned after creation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub assigned_to: Option<i64>,
    pub title: String,
    pub status: String,
    pub priority: String,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
