//! C1 — domain store.
//!
//! The only component permitted to touch the database. Callers pass a
//! `&PgPool` handle — request-scoped when called from an HTTP handler,
//! job-scoped when called from the background worker. Multi-row writes run
//! inside [`crate::common::db::transaction`].

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDateTime, Utc};
use sqlx::PgPool;

use crate::common::db::transaction;
use crate::common::error::{StoreError, StoreResult};
use crate::common::id::{
    EmployeeId, OptimizationConfigId, PlannedShiftId, RoleId, SchedulingRunId,
    ShiftTemplateId, WeeklyScheduleId,
};

use super::model::{
    Employee, EmployeePreference, OptimizationConfig, PlannedShift, PlannedShiftStatus, Role,
    SchedulingRun, SchedulingRunStatus, SchedulingSolutionRow, ShiftAssignment, SolverStatus,
    SystemConstraint, TimeOffRequest, TimeOffStatus,
};

/// The eagerly-loaded, frozen snapshot a run needs. Everything C2 consumes
/// comes from here — no component downstream of C1 issues a query.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub weekly_schedule_id: WeeklyScheduleId,
    pub config: OptimizationConfig,
    pub employees: Vec<Employee>,
    pub employee_roles: HashMap<EmployeeId, HashSet<RoleId>>,
    pub roles: Vec<Role>,
    pub shifts: Vec<PlannedShift>,
    pub role_requirements: HashMap<ShiftTemplateId, Vec<(RoleId, i32)>>,
    pub approved_time_off: Vec<TimeOffRequest>,
    pub preferences: Vec<EmployeePreference>,
    pub system_constraints: Vec<SystemConstraint>,
    pub existing_assignments: Vec<ShiftAssignment>,
}

pub async fn weekly_schedule_exists(
    pool: &PgPool,
    weekly_schedule_id: WeeklyScheduleId,
) -> StoreResult<bool> {
    Ok(
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM weekly_schedules WHERE id = $1)")
            .bind(weekly_schedule_id)
            .fetch_one(pool)
            .await?,
    )
}

pub async fn resolve_config(
    pool: &PgPool,
    config_id: Option<OptimizationConfigId>,
) -> StoreResult<OptimizationConfig> {
    match config_id {
        Some(id) => sqlx::query_as("SELECT * FROM optimization_configs WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("optimization config {id}"))),
        None => sqlx::query_as("SELECT * FROM optimization_configs WHERE is_default = true LIMIT 1")
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| StoreError::NotFound("default optimization config".to_string())),
    }
}

pub async fn load_run_context(
    pool: &PgPool,
    weekly_schedule_id: WeeklyScheduleId,
    config_id: Option<OptimizationConfigId>,
) -> StoreResult<RunContext> {
    if !weekly_schedule_exists(pool, weekly_schedule_id).await? {
        return Err(StoreError::NotFound(format!(
            "weekly schedule {weekly_schedule_id}"
        )));
    }

    let config = resolve_config(pool, config_id).await?;

    let employees: Vec<Employee> =
        sqlx::query_as("SELECT * FROM employees WHERE status = 'active' ORDER BY id")
            .fetch_all(pool)
            .await?;

    let employee_role_rows: Vec<(EmployeeId, RoleId)> = sqlx::query_as(
        "SELECT employee_id, role_id FROM employee_roles ORDER BY employee_id",
    )
    .fetch_all(pool)
    .await?;
    let mut employee_roles: HashMap<EmployeeId, HashSet<RoleId>> = HashMap::new();
    for (employee_id, role_id) in employee_role_rows {
        employee_roles.entry(employee_id).or_default().insert(role_id);
    }

    let roles: Vec<Role> = sqlx::query_as("SELECT * FROM roles ORDER BY id")
        .fetch_all(pool)
        .await?;

    let shifts: Vec<PlannedShift> = sqlx::query_as(
        "SELECT * FROM planned_shifts WHERE weekly_schedule_id = $1 AND status != 'cancelled' ORDER BY id",
    )
    .bind(weekly_schedule_id)
    .fetch_all(pool)
    .await?;

    let requirement_rows: Vec<(ShiftTemplateId, RoleId, i32)> = sqlx::query_as(
        "SELECT shift_template_id, role_id, required_count FROM shift_template_role_requirements ORDER BY shift_template_id",
    )
    .fetch_all(pool)
    .await?;
    let mut role_requirements: HashMap<ShiftTemplateId, Vec<(RoleId, i32)>> = HashMap::new();
    for (template_id, role_id, count) in requirement_rows {
        role_requirements
            .entry(template_id)
            .or_default()
            .push((role_id, count));
    }

    let approved_time_off: Vec<TimeOffRequest> = sqlx::query_as(
        "SELECT * FROM time_off_requests WHERE status = 'approved' ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let preferences: Vec<EmployeePreference> =
        sqlx::query_as("SELECT * FROM employee_preferences ORDER BY id")
            .fetch_all(pool)
            .await?;

    let system_constraints: Vec<SystemConstraint> =
        sqlx::query_as("SELECT * FROM system_constraints ORDER BY id")
            .fetch_all(pool)
            .await?;

    let shift_ids: Vec<PlannedShiftId> = shifts.iter().map(|s| s.id).collect();
    let existing_assignments: Vec<ShiftAssignment> = if shift_ids.is_empty() {
        Vec::new()
    } else {
        sqlx::query_as(
            "SELECT * FROM shift_assignments WHERE planned_shift_id = ANY($1) ORDER BY id",
        )
        .bind(&shift_ids.iter().map(|id| id.get()).collect::<Vec<_>>())
        .fetch_all(pool)
        .await?
    };

    Ok(RunContext {
        weekly_schedule_id,
        config,
        employees,
        employee_roles,
        roles,
        shifts,
        role_requirements,
        approved_time_off,
        preferences,
        system_constraints,
        existing_assignments,
    })
}

pub async fn create_run(
    pool: &PgPool,
    weekly_schedule_id: WeeklyScheduleId,
    config_id: OptimizationConfigId,
) -> StoreResult<SchedulingRunId> {
    let row: (SchedulingRunId,) = sqlx::query_as(
        "INSERT INTO scheduling_runs (weekly_schedule_id, optimization_config_id, status, triggered_at)
         VALUES ($1, $2, 'pending', $3) RETURNING id",
    )
    .bind(weekly_schedule_id)
    .bind(config_id)
    .bind(Utc::now().naive_utc())
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// Fields written back to a run over its lifetime. `None` leaves a column
/// untouched; this mirrors the original's partial-update controller method.
#[derive(Debug, Default)]
pub struct RunUpdate {
    pub status: Option<SchedulingRunStatus>,
    pub solver_status: Option<Option<SolverStatus>>,
    pub objective_value: Option<Option<f64>>,
    pub runtime_seconds: Option<Option<f64>>,
    pub achieved_gap: Option<Option<f64>>,
    pub total_assignments: Option<Option<i32>>,
    pub started_at: Option<Option<NaiveDateTime>>,
    pub completed_at: Option<Option<NaiveDateTime>>,
    pub error_message: Option<Option<String>>,
}

pub async fn update_run(
    pool: &PgPool,
    run_id: SchedulingRunId,
    update: RunUpdate,
) -> StoreResult<()> {
    let current: SchedulingRun = get_run(pool, run_id).await?;
    let status = update.status.unwrap_or(current.status);
    let solver_status = update.solver_status.unwrap_or(current.solver_status);
    let objective_value = update.objective_value.unwrap_or(current.objective_value);
    let runtime_seconds = update.runtime_seconds.unwrap_or(current.runtime_seconds);
    let achieved_gap = update.achieved_gap.unwrap_or(current.achieved_gap);
    let total_assignments = update
        .total_assignments
        .unwrap_or(current.total_assignments);
    let started_at = update.started_at.unwrap_or(current.started_at);
    let completed_at = update.completed_at.unwrap_or(current.completed_at);
    let error_message = update.error_message.unwrap_or(current.error_message);

    sqlx::query(
        "UPDATE scheduling_runs SET status = $1, solver_status = $2, objective_value = $3,
         runtime_seconds = $4, achieved_gap = $5, total_assignments = $6, started_at = $7,
         completed_at = $8, error_message = $9 WHERE id = $10",
    )
    .bind(status)
    .bind(solver_status)
    .bind(objective_value)
    .bind(runtime_seconds)
    .bind(achieved_gap)
    .bind(total_assignments)
    .bind(started_at)
    .bind(completed_at)
    .bind(error_message)
    .bind(run_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_run(pool: &PgPool, run_id: SchedulingRunId) -> StoreResult<SchedulingRun> {
    sqlx::query_as("SELECT * FROM scheduling_runs WHERE id = $1")
        .bind(run_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("scheduling run {run_id}")))
}

pub async fn list_runs(
    pool: &PgPool,
    weekly_schedule_id: WeeklyScheduleId,
) -> StoreResult<Vec<SchedulingRun>> {
    Ok(sqlx::query_as(
        "SELECT * FROM scheduling_runs WHERE weekly_schedule_id = $1 ORDER BY triggered_at DESC",
    )
    .bind(weekly_schedule_id)
    .fetch_all(pool)
    .await?)
}

pub struct NewSolutionRow {
    pub planned_shift_id: PlannedShiftId,
    pub employee_id: EmployeeId,
    pub role_id: RoleId,
    pub preference_score: f64,
}

pub async fn insert_solutions(
    pool: &PgPool,
    run_id: SchedulingRunId,
    rows: Vec<NewSolutionRow>,
) -> StoreResult<()> {
    transaction(pool, |tx| async move {
        for row in rows {
            sqlx::query(
                "INSERT INTO scheduling_solutions
                 (scheduling_run_id, planned_shift_id, employee_id, role_id, preference_score)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(run_id)
            .bind(row.planned_shift_id)
            .bind(row.employee_id)
            .bind(row.role_id)
            .bind(row.preference_score)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    })
    .await
}

pub async fn list_solutions(
    pool: &PgPool,
    run_id: SchedulingRunId,
) -> StoreResult<Vec<SchedulingSolutionRow>> {
    Ok(sqlx::query_as(
        "SELECT * FROM scheduling_solutions WHERE scheduling_run_id = $1 ORDER BY id",
    )
    .bind(run_id)
    .fetch_all(pool)
    .await?)
}

/// Outcome of replacing live assignments with a run's solutions (C5 step 3).
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ApplySummary {
    pub shifts_affected: i64,
    pub assignments_created: i64,
}

/// Atomically replaces live assignments for every shift the run's solutions
/// cover. Assumes the caller (C5) has already verified the run is eligible;
/// this function performs no domain validation of its own.
pub async fn apply_solution(
    pool: &PgPool,
    run_id: SchedulingRunId,
) -> StoreResult<ApplySummary> {
    let solutions = list_solutions(pool, run_id).await?;
    let shift_ids: Vec<i32> = {
        let mut ids: Vec<i32> = solutions.iter().map(|s| s.planned_shift_id.get()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    };

    if shift_ids.is_empty() {
        return Ok(ApplySummary::default());
    }

    transaction(pool, |tx| {
        let solutions = solutions.clone();
        let shift_ids = shift_ids.clone();
        async move {
            sqlx::query("DELETE FROM shift_assignments WHERE planned_shift_id = ANY($1)")
                .bind(&shift_ids)
                .execute(&mut **tx)
                .await?;

            let mut created = 0i64;
            for solution in &solutions {
                let (Some(employee_id), Some(role_id)) =
                    (solution.employee_id, solution.role_id)
                else {
                    continue;
                };
                let result = sqlx::query(
                    "INSERT INTO shift_assignments (planned_shift_id, employee_id, role_id)
                     VALUES ($1, $2, $3)
                     ON CONFLICT (planned_shift_id, employee_id) DO NOTHING",
                )
                .bind(solution.planned_shift_id)
                .bind(employee_id)
                .bind(role_id)
                .execute(&mut **tx)
                .await?;
                created += result.rows_affected() as i64;
            }

            for shift_id_raw in &shift_ids {
                let shift_id: PlannedShiftId = (*shift_id_raw).into();
                let inserted: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM shift_assignments WHERE planned_shift_id = $1",
                )
                .bind(shift_id)
                .fetch_one(&mut **tx)
                .await?;

                let required: i64 = sqlx::query_scalar(
                    "SELECT COALESCE(SUM(r.required_count), 0)
                     FROM planned_shifts p
                     JOIN shift_template_role_requirements r ON r.shift_template_id = p.shift_template_id
                     WHERE p.id = $1",
                )
                .bind(shift_id)
                .fetch_one(&mut **tx)
                .await?;

                let status = if required > 0 && inserted >= required {
                    PlannedShiftStatus::FullyAssigned
                } else if inserted > 0 {
                    PlannedShiftStatus::PartiallyAssigned
                } else {
                    PlannedShiftStatus::Planned
                };

                sqlx::query("UPDATE planned_shifts SET status = $1 WHERE id = $2")
                    .bind(status)
                    .bind(shift_id)
                    .execute(&mut **tx)
                    .await?;
            }

            Ok(ApplySummary {
                shifts_affected: shift_ids.len() as i64,
                assignments_created: created,
            })
        }
    })
    .await
}

/// Approve a pending time-off request. Part of the store surface because it
/// mutates workforce state the next run's `load_run_context` will observe.
pub async fn approve_time_off_request(
    pool: &PgPool,
    request_id: crate::common::id::TimeOffRequestId,
) -> StoreResult<()> {
    let updated = sqlx::query(
        "UPDATE time_off_requests SET status = $1 WHERE id = $2 AND status = 'pending'",
    )
    .bind(TimeOffStatus::Approved)
    .bind(request_id)
    .execute(pool)
    .await?;
    if updated.rows_affected() == 0 {
        return Err(StoreError::NotFound(format!(
            "pending time-off request {request_id}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------
// CRUD surface (SPEC_FULL §6: the minimal read/write endpoints the core's
// interface depends on). No optimization logic lives below this line —
// plain repository functions, one per resource, mirroring the original's
// repository/controller split without the controller's HTTP concerns.
// ---------------------------------------------------------------------

pub async fn create_employee(
    pool: &PgPool,
    full_name: &str,
    status: crate::domains::workforce::model::EmployeeStatus,
    is_manager: bool,
) -> StoreResult<Employee> {
    Ok(sqlx::query_as(
        "INSERT INTO employees (full_name, status, is_manager) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(full_name)
    .bind(status)
    .bind(is_manager)
    .fetch_one(pool)
    .await?)
}

pub async fn list_employees(pool: &PgPool) -> StoreResult<Vec<Employee>> {
    Ok(sqlx::query_as("SELECT * FROM employees ORDER BY id")
        .fetch_all(pool)
        .await?)
}

pub async fn get_employee(pool: &PgPool, id: EmployeeId) -> StoreResult<Employee> {
    sqlx::query_as("SELECT * FROM employees WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("employee {id}")))
}

pub async fn create_role(pool: &PgPool, name: &str) -> StoreResult<Role> {
    sqlx::query_as("INSERT INTO roles (name) VALUES ($1) RETURNING *")
        .bind(name)
        .fetch_one(pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(format!("role {name} already exists"))
            }
            other => StoreError::Database(other),
        })
}

pub async fn list_roles(pool: &PgPool) -> StoreResult<Vec<Role>> {
    Ok(sqlx::query_as("SELECT * FROM roles ORDER BY id")
        .fetch_all(pool)
        .await?)
}

pub async fn assign_employee_role(
    pool: &PgPool,
    employee_id: EmployeeId,
    role_id: RoleId,
) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO employee_roles (employee_id, role_id) VALUES ($1, $2)
         ON CONFLICT DO NOTHING",
    )
    .bind(employee_id)
    .bind(role_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn create_shift_template(
    pool: &PgPool,
    name: &str,
    start_time_of_day: Option<chrono::NaiveTime>,
    end_time_of_day: Option<chrono::NaiveTime>,
    location: Option<&str>,
    role_requirements: &[(RoleId, i32)],
) -> StoreResult<crate::domains::workforce::model::ShiftTemplate> {
    transaction(pool, |tx| {
        let role_requirements = role_requirements.to_vec();
        async move {
            let template: crate::domains::workforce::model::ShiftTemplate = sqlx::query_as(
                "INSERT INTO shift_templates (name, start_time_of_day, end_time_of_day, location)
                 VALUES ($1, $2, $3, $4) RETURNING *",
            )
            .bind(name)
            .bind(start_time_of_day)
            .bind(end_time_of_day)
            .bind(location)
            .fetch_one(&mut **tx)
            .await
            .map_err(|err| match err {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    StoreError::Conflict(format!("shift template {name} already exists"))
                }
                other => StoreError::Database(other),
            })?;

            for &(role_id, required_count) in &role_requirements {
                sqlx::query(
                    "INSERT INTO shift_template_role_requirements
                     (shift_template_id, role_id, required_count) VALUES ($1, $2, $3)",
                )
                .bind(template.id)
                .bind(role_id)
                .bind(required_count)
                .execute(&mut **tx)
                .await?;
            }

            Ok(template)
        }
    })
    .await
}

pub async fn list_shift_templates(
    pool: &PgPool,
) -> StoreResult<Vec<crate::domains::workforce::model::ShiftTemplate>> {
    Ok(
        sqlx::query_as("SELECT * FROM shift_templates ORDER BY id")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn create_weekly_schedule(
    pool: &PgPool,
    week_start_date: chrono::NaiveDate,
    created_by: EmployeeId,
) -> StoreResult<crate::domains::workforce::model::WeeklySchedule> {
    Ok(sqlx::query_as(
        "INSERT INTO weekly_schedules (week_start_date, status, created_by)
         VALUES ($1, 'draft', $2) RETURNING *",
    )
    .bind(week_start_date)
    .bind(created_by)
    .fetch_one(pool)
    .await?)
}

pub async fn list_weekly_schedules(
    pool: &PgPool,
) -> StoreResult<Vec<crate::domains::workforce::model::WeeklySchedule>> {
    Ok(
        sqlx::query_as("SELECT * FROM weekly_schedules ORDER BY week_start_date DESC")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn get_weekly_schedule(
    pool: &PgPool,
    id: WeeklyScheduleId,
) -> StoreResult<crate::domains::workforce::model::WeeklySchedule> {
    sqlx::query_as("SELECT * FROM weekly_schedules WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("weekly schedule {id}")))
}

pub async fn publish_weekly_schedule(
    pool: &PgPool,
    id: WeeklyScheduleId,
    published_by: EmployeeId,
) -> StoreResult<crate::domains::workforce::model::WeeklySchedule> {
    sqlx::query_as(
        "UPDATE weekly_schedules SET status = 'published', published_by = $2, published_at = $3
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(published_by)
    .bind(Utc::now().naive_utc())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StoreError::NotFound(format!("weekly schedule {id}")))
}

/// Creates a planned shift on a template, computing `start_datetime` /
/// `end_datetime` from the template's time-of-day bounds with the overnight
/// rollover rule C2 also applies (spec.md §4.2's "overnight normalization").
pub async fn create_planned_shift(
    pool: &PgPool,
    weekly_schedule_id: WeeklyScheduleId,
    shift_template_id: ShiftTemplateId,
    shift_date: chrono::NaiveDate,
    location: Option<&str>,
) -> StoreResult<PlannedShift> {
    let template: crate::domains::workforce::model::ShiftTemplate =
        sqlx::query_as("SELECT * FROM shift_templates WHERE id = $1")
            .bind(shift_template_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("shift template {shift_template_id}")))?;

    let (start_datetime, end_datetime) = match (template.start_time_of_day, template.end_time_of_day)
    {
        (Some(start), Some(end)) => {
            crate::domains::scheduling::data::normalize_shift_interval(shift_date, start, end)
        }
        _ => {
            let start = shift_date.and_hms_opt(0, 0, 0).unwrap();
            (start, start)
        }
    };

    Ok(sqlx::query_as(
        "INSERT INTO planned_shifts
         (weekly_schedule_id, shift_template_id, shift_date, start_datetime, end_datetime, location, status)
         VALUES ($1, $2, $3, $4, $5, $6, 'planned') RETURNING *",
    )
    .bind(weekly_schedule_id)
    .bind(shift_template_id)
    .bind(shift_date)
    .bind(start_datetime)
    .bind(end_datetime)
    .bind(location)
    .fetch_one(pool)
    .await?)
}

pub async fn list_planned_shifts(
    pool: &PgPool,
    weekly_schedule_id: WeeklyScheduleId,
) -> StoreResult<Vec<PlannedShift>> {
    Ok(sqlx::query_as(
        "SELECT * FROM planned_shifts WHERE weekly_schedule_id = $1 ORDER BY start_datetime",
    )
    .bind(weekly_schedule_id)
    .fetch_all(pool)
    .await?)
}

pub async fn list_shift_assignments(
    pool: &PgPool,
    weekly_schedule_id: WeeklyScheduleId,
) -> StoreResult<Vec<ShiftAssignment>> {
    Ok(sqlx::query_as(
        "SELECT a.* FROM shift_assignments a
         JOIN planned_shifts p ON p.id = a.planned_shift_id
         WHERE p.weekly_schedule_id = $1
         ORDER BY a.id",
    )
    .bind(weekly_schedule_id)
    .fetch_all(pool)
    .await?)
}

pub async fn create_time_off_request(
    pool: &PgPool,
    employee_id: EmployeeId,
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
) -> StoreResult<TimeOffRequest> {
    Ok(sqlx::query_as(
        "INSERT INTO time_off_requests (employee_id, start_date, end_date, status)
         VALUES ($1, $2, $3, 'pending') RETURNING *",
    )
    .bind(employee_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_one(pool)
    .await?)
}

pub async fn list_time_off_requests(pool: &PgPool) -> StoreResult<Vec<TimeOffRequest>> {
    Ok(sqlx::query_as("SELECT * FROM time_off_requests ORDER BY id")
        .fetch_all(pool)
        .await?)
}

pub async fn create_employee_preference(
    pool: &PgPool,
    employee_id: EmployeeId,
    shift_template_id: Option<ShiftTemplateId>,
    day_of_week: Option<crate::domains::workforce::model::DayOfWeek>,
    start_time_of_day: Option<chrono::NaiveTime>,
    end_time_of_day: Option<chrono::NaiveTime>,
    weight: f64,
) -> StoreResult<EmployeePreference> {
    Ok(sqlx::query_as(
        "INSERT INTO employee_preferences
         (employee_id, shift_template_id, day_of_week, start_time_of_day, end_time_of_day, weight)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(employee_id)
    .bind(shift_template_id)
    .bind(day_of_week)
    .bind(start_time_of_day)
    .bind(end_time_of_day)
    .bind(weight)
    .fetch_one(pool)
    .await?)
}

pub async fn list_employee_preferences(pool: &PgPool) -> StoreResult<Vec<EmployeePreference>> {
    Ok(
        sqlx::query_as("SELECT * FROM employee_preferences ORDER BY id")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn upsert_system_constraint(
    pool: &PgPool,
    constraint_type: crate::domains::workforce::model::SystemConstraintType,
    value: f64,
    is_hard: bool,
) -> StoreResult<SystemConstraint> {
    Ok(sqlx::query_as(
        "INSERT INTO system_constraints (constraint_type, value, is_hard)
         VALUES ($1, $2, $3)
         ON CONFLICT (constraint_type) DO UPDATE SET value = $2, is_hard = $3
         RETURNING *",
    )
    .bind(constraint_type)
    .bind(value)
    .bind(is_hard)
    .fetch_one(pool)
    .await?)
}

pub async fn list_system_constraints(pool: &PgPool) -> StoreResult<Vec<SystemConstraint>> {
    Ok(
        sqlx::query_as("SELECT * FROM system_constraints ORDER BY constraint_type")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn create_optimization_config(
    pool: &PgPool,
    name: &str,
    weight_fairness: f64,
    weight_preferences: f64,
    weight_cost: f64,
    weight_coverage: f64,
    max_runtime_seconds: i32,
    mip_gap: f64,
    is_default: bool,
) -> StoreResult<OptimizationConfig> {
    transaction(pool, |tx| async move {
        if is_default {
            sqlx::query("UPDATE optimization_configs SET is_default = false WHERE is_default = true")
                .execute(&mut **tx)
                .await?;
        }
        sqlx::query_as(
            "INSERT INTO optimization_configs
             (name, weight_fairness, weight_preferences, weight_cost, weight_coverage,
              max_runtime_seconds, mip_gap, is_default)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(name)
        .bind(weight_fairness)
        .bind(weight_preferences)
        .bind(weight_cost)
        .bind(weight_coverage)
        .bind(max_runtime_seconds)
        .bind(mip_gap)
        .bind(is_default)
        .fetch_one(&mut **tx)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(format!("optimization config {name} already exists"))
            }
            other => StoreError::Database(other),
        })
    })
    .await
}

pub async fn list_optimization_configs(pool: &PgPool) -> StoreResult<Vec<OptimizationConfig>> {
    Ok(
        sqlx::query_as("SELECT * FROM optimization_configs ORDER BY id")
            .fetch_all(pool)
            .await?,
    )
}
