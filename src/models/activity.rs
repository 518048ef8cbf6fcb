//! Activity feed rows (written elsewhere, read for dashboards).

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ActivityEntry {
    pub action: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
    pub username: Option<String>,
}
