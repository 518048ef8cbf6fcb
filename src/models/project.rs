//! Project model and status taxonomy.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::label::normalize;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProjectStatus {
    Planning,
    Active,
    #[serde(rename = "On Hold", alias = "OnHold")]
    OnHold,
    Completed,
}

impl ProjectStatus {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Active => "Active",
            Self::OnHold => "On Hold",
            Self::Completed => "Completed",
        }
    }

    /// Parse a stored status leniently; `None` for labels outside the taxonomy.
    pub fn from_label(label: &str) -> Option<Self> {
        match normalize(label).as_str() {
            "planning" => Some(Self::Planning),
            "active" => Some(Self::Active),
            "onhold" => Some(Self::OnHold),
            "completed" | "complete" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Planning and Active projects both count as live work on dashboards.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Planning | Self::Active)
    }
}

/// Full project row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i64,
    pub enterprise_id: i64,
    pub pm_id: Option<i64>,
    pub name: String,
    pub status: String,
    pub budget_total: f64,
    pub budget_spent: f64,
    pub team_size: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Compact project entry for dashboard feeds.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ProjectSummary {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub budget_total: f64,
    pub budget_spent: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub status: Option<ProjectStatus>,
    #[validate(range(min = 0.0))]
    pub budget_total: Option<f64>,
    #[validate(range(min = 1, max = 10000))]
    pub team_size: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Only honoured for admins; project managers always own what they create.
    pub pm_id: Option<i64>,
}

impl CreateProject {
    /// Cross-field check the derive cannot express.
    pub fn dates_in_order(&self) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        }
    }
}
