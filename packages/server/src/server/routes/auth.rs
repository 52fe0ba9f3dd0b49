//! `POST /auth/register` and `POST /auth/login` — the ambient login flow
//! SPEC_FULL adds so the `is_manager` capability flag the HTTP surface
//! gates on (spec.md §6.1) has somewhere to come from.

use axum::extract::State;
use axum::Json;

use crate::common::error::{DomainError, DomainResult};
use crate::domains::activity::model::{ActivityActionType, ActivityEntityType};
use crate::domains::activity::store as activity_store;
use crate::domains::auth::model::{LoginRequest, RegisterRequest, TokenResponse};
use crate::domains::auth::password;
use crate::domains::auth::store as auth_store;
use crate::domains::workforce::model::EmployeeStatus;
use crate::domains::workforce::store as workforce_store;

use super::super::app::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> DomainResult<Json<TokenResponse>> {
    let employee = workforce_store::create_employee(
        &state.db_pool,
        &body.full_name,
        EmployeeStatus::Active,
        body.is_manager,
    )
    .await?;

    let password_hash = password::hash_password(&body.password)
        .map_err(|_| DomainError::Validation("could not hash password".to_string()))?;
    auth_store::create_user(&state.db_pool, employee.id, &body.username, &password_hash).await?;

    activity_store::log_activity(
        &state.db_pool,
        ActivityActionType::Create,
        ActivityEntityType::User,
        employee.id.get(),
        Some(employee.id),
        Some(format!("registered {}", body.username)),
    )
    .await?;

    let token = state
        .jwt
        .issue(employee.id, employee.is_manager)
        .map_err(|_| DomainError::Validation("could not issue token".to_string()))?;

    Ok(Json(TokenResponse {
        token,
        employee_id: employee.id,
        is_manager: employee.is_manager,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> DomainResult<Json<TokenResponse>> {
    let user = auth_store::find_by_username(&state.db_pool, &body.username).await?;
    password::verify_password(&body.password, &user.password_hash)
        .map_err(|_| DomainError::Validation("invalid username or password".to_string()))?;

    let employee = workforce_store::get_employee(&state.db_pool, user.employee_id).await?;
    let token = state
        .jwt
        .issue(employee.id, employee.is_manager)
        .map_err(|_| DomainError::Validation("could not issue token".to_string()))?;

    Ok(Json(TokenResponse {
        token,
        employee_id: employee.id,
        is_manager: employee.is_manager,
    }))
}
