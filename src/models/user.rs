//! User model, roles and the per-request session view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role")]
pub enum UserRole {
    Admin,
    #[sqlx(rename = "PM")]
    #[serde(rename = "PM")]
    ProjectManager,
    Analyst,
    Vendor,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Admin,
        UserRole::ProjectManager,
        UserRole::Analyst,
        UserRole::Vendor,
    ];

    /// URL segment used by the role router (`/dashboard/{segment}`).
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ProjectManager => "pm",
            Self::Analyst => "analyst",
            Self::Vendor => "vendor",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.segment().eq_ignore_ascii_case(segment))
    }

    /// Stored/serialized label, as written in the `user_role` enum.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::ProjectManager => "PM",
            Self::Analyst => "Analyst",
            Self::Vendor => "Vendor",
        }
    }

    /// Human title used in breadcrumbs.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::ProjectManager => "Project Manager",
            Self::Analyst => "Analyst",
            Self::Vendor => "Vendor",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Full user row from database (includes password_hash; never serialize to API).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub enterprise_id: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// User response DTO, excludes password_hash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub enterprise_id: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            role: u.role,
            enterprise_id: u.enterprise_id,
            is_active: u.is_active,
            created_at: u.created_at,
        }
    }
}

/// Headcount figures for the admin user-management page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, FromRow)]
pub struct UserStats {
    pub total_users: i64,
    pub active_users: i64,
    pub inactive_users: i64,
    pub pm_count: i64,
}

/// Who is making the request, as seen by presentation code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionUser {
    Authenticated {
        id: i64,
        username: String,
        role: UserRole,
    },
    Guest,
}

impl SessionUser {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn role(&self) -> Option<UserRole> {
        match self {
            Self::Authenticated { role, .. } => Some(*role),
            Self::Guest => None,
        }
    }
}
