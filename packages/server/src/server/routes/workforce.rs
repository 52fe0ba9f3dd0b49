//! CRUD surface around the scheduling core (spec.md §1: HTTP routing is an
//! external collaborator scope). Every handler here is a thin translation
//! layer over [`crate::domains::workforce::store`] — no business rules live
//! in this module.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::common::error::DomainResult;
use crate::common::id::WeeklyScheduleId;
use crate::domains::activity::model::{ActivityActionType, ActivityEntityType};
use crate::domains::activity::store as activity_store;
use crate::domains::workforce::dto::*;
use crate::domains::workforce::model::*;
use crate::domains::workforce::store;

use super::super::app::AppState;
use super::super::middleware::{AuthUser, ManagerUser};

pub async fn list_employees(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> DomainResult<Json<Vec<Employee>>> {
    Ok(Json(store::list_employees(&state.db_pool).await?))
}

pub async fn create_employee(
    State(state): State<AppState>,
    _manager: ManagerUser,
    Json(body): Json<CreateEmployeeRequest>,
) -> DomainResult<Json<Employee>> {
    Ok(Json(
        store::create_employee(&state.db_pool, &body.full_name, body.status, body.is_manager)
            .await?,
    ))
}

pub async fn list_roles(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> DomainResult<Json<Vec<Role>>> {
    Ok(Json(store::list_roles(&state.db_pool).await?))
}

pub async fn create_role(
    State(state): State<AppState>,
    _manager: ManagerUser,
    Json(body): Json<CreateRoleRequest>,
) -> DomainResult<Json<Role>> {
    Ok(Json(store::create_role(&state.db_pool, &body.name).await?))
}

pub async fn assign_employee_role(
    State(state): State<AppState>,
    _manager: ManagerUser,
    Json(body): Json<AssignRoleRequest>,
) -> DomainResult<()> {
    store::assign_employee_role(&state.db_pool, body.employee_id, body.role_id).await?;
    Ok(())
}

pub async fn list_shift_templates(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> DomainResult<Json<Vec<ShiftTemplate>>> {
    Ok(Json(store::list_shift_templates(&state.db_pool).await?))
}

pub async fn create_shift_template(
    State(state): State<AppState>,
    _manager: ManagerUser,
    Json(body): Json<CreateShiftTemplateRequest>,
) -> DomainResult<Json<ShiftTemplate>> {
    let requirements: Vec<(crate::common::id::RoleId, i32)> = body
        .role_requirements
        .iter()
        .map(|r| (r.role_id, r.required_count))
        .collect();
    Ok(Json(
        store::create_shift_template(
            &state.db_pool,
            &body.name,
            body.start_time_of_day,
            body.end_time_of_day,
            body.location.as_deref(),
            &requirements,
        )
        .await?,
    ))
}

pub async fn list_weekly_schedules(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> DomainResult<Json<Vec<WeeklySchedule>>> {
    Ok(Json(store::list_weekly_schedules(&state.db_pool).await?))
}

pub async fn create_weekly_schedule(
    State(state): State<AppState>,
    _manager: ManagerUser,
    Json(body): Json<CreateWeeklyScheduleRequest>,
) -> DomainResult<Json<WeeklySchedule>> {
    let schedule = store::create_weekly_schedule(
        &state.db_pool,
        body.week_start_date,
        body.created_by,
    )
    .await?;

    activity_store::log_activity(
        &state.db_pool,
        ActivityActionType::Create,
        ActivityEntityType::Schedule,
        schedule.id.get(),
        Some(body.created_by),
        None,
    )
    .await?;

    Ok(Json(schedule))
}

pub async fn get_weekly_schedule(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<WeeklyScheduleId>,
) -> DomainResult<Json<WeeklySchedule>> {
    Ok(Json(store::get_weekly_schedule(&state.db_pool, id).await?))
}

pub async fn publish_weekly_schedule(
    State(state): State<AppState>,
    _manager: ManagerUser,
    Path(id): Path<WeeklyScheduleId>,
    Json(body): Json<PublishScheduleRequest>,
) -> DomainResult<Json<WeeklySchedule>> {
    let schedule =
        store::publish_weekly_schedule(&state.db_pool, id, body.published_by).await?;

    activity_store::log_activity(
        &state.db_pool,
        ActivityActionType::Publish,
        ActivityEntityType::Schedule,
        schedule.id.get(),
        Some(body.published_by),
        None,
    )
    .await?;

    Ok(Json(schedule))
}

#[derive(Debug, Deserialize)]
pub struct WeeklyScheduleScope {
    pub weekly_schedule_id: WeeklyScheduleId,
}

pub async fn list_planned_shifts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(scope): Query<WeeklyScheduleScope>,
) -> DomainResult<Json<Vec<PlannedShift>>> {
    Ok(Json(
        store::list_planned_shifts(&state.db_pool, scope.weekly_schedule_id).await?,
    ))
}

pub async fn create_planned_shift(
    State(state): State<AppState>,
    _manager: ManagerUser,
    Json(body): Json<CreatePlannedShiftRequest>,
) -> DomainResult<Json<PlannedShift>> {
    let shift = store::create_planned_shift(
        &state.db_pool,
        body.weekly_schedule_id,
        body.shift_template_id,
        body.shift_date,
        body.location.as_deref(),
    )
    .await?;

    activity_store::log_activity(
        &state.db_pool,
        ActivityActionType::Create,
        ActivityEntityType::Shift,
        shift.id.get(),
        None,
        None,
    )
    .await?;

    Ok(Json(shift))
}

pub async fn list_shift_assignments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(scope): Query<WeeklyScheduleScope>,
) -> DomainResult<Json<Vec<ShiftAssignment>>> {
    Ok(Json(
        store::list_shift_assignments(&state.db_pool, scope.weekly_schedule_id).await?,
    ))
}

pub async fn list_time_off_requests(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> DomainResult<Json<Vec<TimeOffRequest>>> {
    Ok(Json(store::list_time_off_requests(&state.db_pool).await?))
}

pub async fn create_time_off_request(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<CreateTimeOffRequestRequest>,
) -> DomainResult<Json<TimeOffRequest>> {
    Ok(Json(
        store::create_time_off_request(
            &state.db_pool,
            body.employee_id,
            body.start_date,
            body.end_date,
        )
        .await?,
    ))
}

pub async fn approve_time_off_request(
    State(state): State<AppState>,
    _manager: ManagerUser,
    Path(id): Path<crate::common::id::TimeOffRequestId>,
) -> DomainResult<()> {
    store::approve_time_off_request(&state.db_pool, id).await?;
    activity_store::log_activity(
        &state.db_pool,
        ActivityActionType::Approve,
        ActivityEntityType::TimeOff,
        id.get(),
        None,
        None,
    )
    .await?;
    Ok(())
}

pub async fn list_employee_preferences(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> DomainResult<Json<Vec<EmployeePreference>>> {
    Ok(Json(
        store::list_employee_preferences(&state.db_pool).await?,
    ))
}

pub async fn create_employee_preference(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<CreateEmployeePreferenceRequest>,
) -> DomainResult<Json<EmployeePreference>> {
    Ok(Json(
        store::create_employee_preference(
            &state.db_pool,
            body.employee_id,
            body.shift_template_id,
            body.day_of_week,
            body.start_time_of_day,
            body.end_time_of_day,
            body.weight,
        )
        .await?,
    ))
}

pub async fn list_system_constraints(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> DomainResult<Json<Vec<SystemConstraint>>> {
    Ok(Json(store::list_system_constraints(&state.db_pool).await?))
}

pub async fn upsert_system_constraint(
    State(state): State<AppState>,
    _manager: ManagerUser,
    Json(body): Json<CreateSystemConstraintRequest>,
) -> DomainResult<Json<SystemConstraint>> {
    let constraint = store::upsert_system_constraint(
        &state.db_pool,
        body.constraint_type,
        body.value,
        body.is_hard,
    )
    .await?;

    activity_store::log_activity(
        &state.db_pool,
        ActivityActionType::Update,
        ActivityEntityType::Constraint,
        constraint.id.get(),
        None,
        None,
    )
    .await?;

    Ok(Json(constraint))
}

pub async fn list_recent_activity(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> DomainResult<Json<Vec<crate::domains::activity::model::ActivityLogRow>>> {
    Ok(Json(activity_store::list_recent(&state.db_pool, 100).await?))
}

pub async fn list_optimization_configs(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> DomainResult<Json<Vec<OptimizationConfig>>> {
    Ok(Json(
        store::list_optimization_configs(&state.db_pool).await?,
    ))
}

pub async fn create_optimization_config(
    State(state): State<AppState>,
    _manager: ManagerUser,
    Json(body): Json<CreateOptimizationConfigRequest>,
) -> DomainResult<Json<OptimizationConfig>> {
    let config = store::create_optimization_config(
        &state.db_pool,
        &body.name,
        body.weight_fairness,
        body.weight_preferences,
        body.weight_cost,
        body.weight_coverage,
        body.max_runtime_seconds,
        body.mip_gap,
        body.is_default,
    )
    .await?;

    activity_store::log_activity(
        &state.db_pool,
        ActivityActionType::Create,
        ActivityEntityType::Config,
        config.id.get(),
        None,
        None,
    )
    .await?;

    Ok(Json(config))
}
