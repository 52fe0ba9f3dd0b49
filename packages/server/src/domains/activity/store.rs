//! Writes the audit trail C4/C5 append on `trigger` and `apply` (and that
//! the CRUD handlers append on create/update/approve). Read-only by design —
//! nothing downstream ever queries its own history back out for a decision.

use sqlx::PgPool;

use crate::common::error::StoreResult;
use crate::common::id::EmployeeId;

use super::model::{ActivityActionType, ActivityEntityType, ActivityLogRow};

pub async fn log_activity(
    pool: &PgPool,
    action_type: ActivityActionType,
    entity_type: ActivityEntityType,
    entity_id: i32,
    employee_id: Option<EmployeeId>,
    details: Option<String>,
) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO activity_logs (action_type, entity_type, entity_id, employee_id, details)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(action_type)
    .bind(entity_type)
    .bind(entity_id)
    .bind(employee_id)
    .bind(details)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn list_recent(pool: &PgPool, limit: i64) -> StoreResult<Vec<ActivityLogRow>> {
    Ok(sqlx::query_as(
        "SELECT * FROM activity_logs ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?)
}
