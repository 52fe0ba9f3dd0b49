//! C5 — solution applier.
//!
//! The only component allowed to turn a run's proposals into live
//! assignments (spec.md §4.5). Validation lives here; the atomic
//! delete+insert+status-update itself is
//! [`crate::domains::workforce::store::apply_solution`], since that is a
//! multi-row write and therefore store territory (spec.md §4.1).

use sqlx::PgPool;

use crate::common::error::{DomainError, DomainResult};
use crate::common::id::{EmployeeId, SchedulingRunId};
use crate::domains::activity::model::{ActivityActionType, ActivityEntityType};
use crate::domains::activity::store as activity_store;
use crate::domains::workforce::model::{SchedulingRunStatus, SolverStatus};
use crate::domains::workforce::store::{self, ApplySummary};

pub async fn apply(
    pool: &PgPool,
    run_id: SchedulingRunId,
    applied_by: EmployeeId,
) -> DomainResult<ApplySummary> {
    let run = store::get_run(pool, run_id).await?;

    if run.status != SchedulingRunStatus::Completed {
        return Err(DomainError::Validation(format!(
            "run {run_id} is not completed (status: {:?})",
            run.status
        )));
    }

    match run.solver_status {
        Some(SolverStatus::Optimal) | Some(SolverStatus::Feasible) => {}
        other => {
            return Err(DomainError::Validation(format!(
                "run {run_id} has no applicable solution (solver status: {other:?})"
            )));
        }
    }

    let summary = store::apply_solution(pool, run_id).await?;

    activity_store::log_activity(
        pool,
        ActivityActionType::Apply,
        ActivityEntityType::Schedule,
        run.weekly_schedule_id.get(),
        Some(applied_by),
        Some(format!(
            "applied run {run_id}: {} shifts, {} assignments",
            summary.shifts_affected, summary.assignments_created
        )),
    )
    .await?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applicable_solver_statuses_are_optimal_or_feasible() {
        assert!(matches!(
            Some(SolverStatus::Optimal),
            Some(SolverStatus::Optimal) | Some(SolverStatus::Feasible)
        ));
        assert!(!matches!(
            Some(SolverStatus::Infeasible),
            Some(SolverStatus::Optimal) | Some(SolverStatus::Feasible)
        ));
    }
}
