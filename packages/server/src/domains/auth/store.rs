//! User credential persistence. Like the rest of the store layer this is
//! the only place that issues queries; callers never see a row outside a
//! `User`/`UserId`.

use sqlx::PgPool;

use crate::common::error::{StoreError, StoreResult};
use crate::common::id::EmployeeId;

use super::model::User;

pub async fn create_user(
    pool: &PgPool,
    employee_id: EmployeeId,
    username: &str,
    password_hash: &str,
) -> StoreResult<User> {
    sqlx::query_as(
        "INSERT INTO users (employee_id, username, password_hash) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(employee_id)
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|err| match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Conflict(format!("username {username} already taken"))
        }
        other => StoreError::Database(other),
    })
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> StoreResult<User> {
    sqlx::query_as("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("user {username}")))
}
