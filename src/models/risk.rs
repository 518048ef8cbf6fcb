//! Risk model with RAG and lifecycle status taxonomies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::label::normalize;

/// Scores strictly above this count as high risks on dashboards.
pub const HIGH_RISK_SCORE_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RagStatus {
    Red,
    Amber,
    Green,
}

impl RagStatus {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Amber => "Amber",
            Self::Green => "Green",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskStatus {
    Identified,
    Open,
    #[serde(rename = "In Progress", alias = "InProgress")]
    InProgress,
    Mitigated,
    Closed,
}

impl RiskStatus {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Identified => "Identified",
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Mitigated => "Mitigated",
            Self::Closed => "Closed",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match normalize(label).as_str() {
            "identified" => Some(Self::Identified),
            "open" => Some(Self::Open),
            "inprogress" => Some(Self::InProgress),
            "mitigated" => Some(Self::Mitigated),
            "closed" | "resolved" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Mitigated and Closed risks no longer need attention.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Mitigated | Self::Closed)
    }
}

/// Full risk row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Risk {
    pub id: i64,
    pub enterprise_id: i64,
    pub project_id: Option<i64>,
    pub title: String,
    pub rag_status: String,
    pub risk_score: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Compact risk entry for dashboard feeds.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct RiskSummary {
    pub id: i64,
    pub title: String,
    pub rag_status: String,
    pub risk_score: f64,
    pub status: String,
    pub project_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRisk {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub project_id: Option<i64>,
    pub rag_status: RagStatus,
    #[validate(range(min = 0.0, max = 10.0))]
    pub risk_score: f64,
    pub status: Option<RiskStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_statuses() {
        assert!(RiskStatus::Mitigated.is_resolved());
        assert!(RiskStatus::Closed.is_resolved());
        assert!(!RiskStatus::Open.is_resolved());
        assert!(!RiskStatus::Identified.is_resolved());
    }

    #[test]
    fn legacy_resolved_label_maps_to_closed() {
        assert_eq!(RiskStatus::from_label("Resolved"), Some(RiskStatus::Closed));
        assert_eq!(RiskStatus::from_label("in progress"), Some(RiskStatus::InProgress));
        assert_eq!(RiskStatus::from_label("Escalated"), None);
    }

    #[test]
    fn create_risk_score_bounds() {
        let mut input = CreateRisk {
            title: "Vendor Delay".to_string(),
            project_id: None,
            rag_status: RagStatus::Amber,
            risk_score: 2.9,
            status: None,
        };
        assert!(input.validate().is_ok());
        input.risk_score = 11.0;
        assert!(input.validate().is_err());
    }
}
