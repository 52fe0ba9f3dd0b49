//! Credential storage, kept separate from `workforce::Employee` (spec.md §3
//! describes the employee as the scheduling-relevant projection; SPEC_FULL's
//! `users` table is the login-relevant one, one-to-one with an employee).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::id::{EmployeeId, Id};

pub mod marker {
    pub struct User;
}
pub type UserId = Id<marker::User>;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub employee_id: EmployeeId,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub is_manager: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub employee_id: EmployeeId,
    pub is_manager: bool,
}
