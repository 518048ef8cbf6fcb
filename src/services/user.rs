//! User directory for the admin user-management page.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::user::UserResponse;

/// Users of `enterprise_id`, newest first.
pub async fn list_for_enterprise(
    pool: &PgPool,
    enterprise_id: i64,
    pagination: &Pagination,
) -> Result<PagedResult<UserResponse>, AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE enterprise_id = $1")
        .bind(enterprise_id)
        .fetch_one(pool)
        .await?;

    let items = sqlx::query_as::<_, UserResponse>(
        r#"
        SELECT id, username, email, role, enterprise_id, is_active, created_at
        FROM users
        WHERE enterprise_id = $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(enterprise_id)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    Ok(PagedResult::new(items, total, pagination))
}
