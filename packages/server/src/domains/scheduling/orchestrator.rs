//! C4 — run orchestrator.
//!
//! Owns the [`SchedulingRun`] state machine (spec.md §4.4). `trigger`
//! validates inputs and persists a `pending` row; `execute_run` is the body
//! the background worker calls once it has claimed the job — it is never
//! called from an HTTP handler directly, matching spec.md §4.4.2's
//! "dispatched through a task-queue interface, not inline."

use chrono::Utc;
use sqlx::PgPool;

use crate::common::error::{DomainError, DomainResult};
use crate::common::id::{EmployeeId, OptimizationConfigId, SchedulingRunId, WeeklyScheduleId};
use crate::domains::activity::model::{ActivityActionType, ActivityEntityType};
use crate::domains::activity::store as activity_store;
use crate::domains::workforce::model::{SchedulingRun, SchedulingRunStatus, SolverStatus};
use crate::domains::workforce::store::{self, NewSolutionRow, RunUpdate};

use super::data;
use super::metrics::{self, RunMetrics};
use super::solver::SolverBackend;

#[derive(Debug, Clone, serde::Serialize)]
pub struct RunWithMetrics {
    #[serde(flatten)]
    pub run: SchedulingRun,
    pub metrics: RunMetrics,
}

/// Validates the schedule exists and resolves the configuration, persists a
/// `pending` run, and returns its id. The caller (the HTTP handler) is
/// responsible for enqueueing the background job with this id — `trigger`
/// itself never blocks on the solve.
pub async fn trigger(
    pool: &PgPool,
    weekly_schedule_id: WeeklyScheduleId,
    config_id: Option<OptimizationConfigId>,
    triggered_by: EmployeeId,
) -> DomainResult<SchedulingRunId> {
    if !store::weekly_schedule_exists(pool, weekly_schedule_id).await? {
        return Err(DomainError::Validation(format!(
            "weekly schedule {weekly_schedule_id} does not exist"
        )));
    }

    let config = store::resolve_config(pool, config_id).await.map_err(|err| {
        if config_id.is_none() {
            DomainError::Validation("no configuration: no config id given and no default configuration exists".to_string())
        } else {
            DomainError::Store(err)
        }
    })?;

    let run_id = store::create_run(pool, weekly_schedule_id, config.id).await?;

    activity_store::log_activity(
        pool,
        ActivityActionType::Optimize,
        ActivityEntityType::Schedule,
        weekly_schedule_id.get(),
        Some(triggered_by),
        Some(format!("triggered run {run_id} with config {}", config.id)),
    )
    .await?;

    Ok(run_id)
}

/// The body of the worker's job: `pending -> running -> {completed, failed}`.
/// Stateless per call (spec.md §5's reentrancy note) — safe to re-invoke for
/// the same `run_id` after a crash since C1-C3 read a fresh snapshot and
/// overwrite the run row rather than accumulate state.
pub async fn execute_run(
    pool: &PgPool,
    run_id: SchedulingRunId,
    backend: &dyn SolverBackend,
) -> DomainResult<()> {
    store::update_run(
        pool,
        run_id,
        RunUpdate {
            status: Some(SchedulingRunStatus::Running),
            started_at: Some(Some(Utc::now().naive_utc())),
            solver_status: Some(None),
            ..Default::default()
        },
    )
    .await?;

    let run = store::get_run(pool, run_id).await?;

    let result = run_solve(pool, &run, backend).await;

    match result {
        Ok(outcome) => {
            store::update_run(
                pool,
                run_id,
                RunUpdate {
                    status: Some(SchedulingRunStatus::Completed),
                    solver_status: Some(Some(outcome.status)),
                    objective_value: Some(outcome.objective_value),
                    runtime_seconds: Some(Some(outcome.runtime_seconds)),
                    achieved_gap: Some(outcome.achieved_gap),
                    total_assignments: Some(Some(outcome.assignments_count as i32)),
                    completed_at: Some(Some(Utc::now().naive_utc())),
                    error_message: Some(outcome.error_detail),
                    ..Default::default()
                },
            )
            .await?;
            Ok(())
        }
        Err(fault) => {
            store::update_run(
                pool,
                run_id,
                RunUpdate {
                    status: Some(SchedulingRunStatus::Failed),
                    completed_at: Some(Some(Utc::now().naive_utc())),
                    error_message: Some(Some(fault.to_string())),
                    ..Default::default()
                },
            )
            .await?;
            // Unhandled faults mark the run failed but never bubble past the
            // worker boundary as a task-queue retry (spec.md §7).
            Ok(())
        }
    }
}

struct SolveSummary {
    status: SolverStatus,
    objective_value: Option<f64>,
    runtime_seconds: f64,
    achieved_gap: Option<f64>,
    assignments_count: usize,
    error_detail: Option<String>,
}

async fn run_solve(
    pool: &PgPool,
    run: &SchedulingRun,
    backend: &dyn SolverBackend,
) -> anyhow::Result<SolveSummary> {
    let ctx = store::load_run_context(pool, run.weekly_schedule_id, Some(run.optimization_config_id))
        .await?;
    let optimization_data = data::build(&ctx);
    let outcome = backend.solve(&optimization_data, &ctx.config);

    let rows: Vec<NewSolutionRow> = outcome
        .assignments
        .iter()
        .map(|a| NewSolutionRow {
            planned_shift_id: a.shift_id,
            employee_id: a.employee_id,
            role_id: a.role_id,
            preference_score: a.preference_score,
        })
        .collect();

    let assignments_count = rows.len();
    if !rows.is_empty() {
        store::insert_solutions(pool, run.id, rows).await?;
    }

    Ok(SolveSummary {
        status: outcome.status,
        objective_value: outcome.objective_value,
        runtime_seconds: outcome.runtime_seconds,
        achieved_gap: outcome.achieved_gap,
        assignments_count,
        error_detail: outcome.error_detail,
    })
}

pub async fn get_run_with_metrics(pool: &PgPool, run_id: SchedulingRunId) -> DomainResult<RunWithMetrics> {
    let run = store::get_run(pool, run_id).await?;
    let solutions = store::list_solutions(pool, run_id).await?;
    let shifts_total = store::list_planned_shifts(pool, run.weekly_schedule_id)
        .await?
        .len() as i64;
    let employees_total = store::load_run_context(pool, run.weekly_schedule_id, None)
        .await
        .map(|ctx| ctx.employees.len() as i64)
        .unwrap_or(0);

    let run_metrics = metrics::calculate_metrics(&solutions, shifts_total, employees_total);
    Ok(RunWithMetrics {
        run,
        metrics: run_metrics,
    })
}

pub async fn list_runs(pool: &PgPool, weekly_schedule_id: WeeklyScheduleId) -> DomainResult<Vec<RunWithMetrics>> {
    let runs = store::list_runs(pool, weekly_schedule_id).await?;
    let shifts_total = store::list_planned_shifts(pool, weekly_schedule_id).await?.len() as i64;
    let employees_total = store::load_run_context(pool, weekly_schedule_id, None)
        .await
        .map(|ctx| ctx.employees.len() as i64)
        .unwrap_or(0);

    let mut out = Vec::with_capacity(runs.len());
    for run in runs {
        let solutions = store::list_solutions(pool, run.id).await?;
        let run_metrics = metrics::calculate_metrics(&solutions, shifts_total, employees_total);
        out.push(RunWithMetrics {
            run,
            metrics: run_metrics,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_with_metrics_serializes_run_fields_flattened() {
        // Compile-time check only: `#[serde(flatten)]` over `run` plus a
        // sibling `metrics` field must not collide on field names.
        fn assert_serialize<T: serde::Serialize>() {}
        assert_serialize::<RunWithMetrics>();
    }
}
