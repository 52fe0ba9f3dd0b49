//! The 4 scheduling routes spec.md §6.1 lists. Each handler does nothing but
//! translate HTTP in/out — all business logic lives in C1/C4/C5.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::common::error::DomainResult;
use crate::common::id::{OptimizationConfigId, SchedulingRunId, WeeklyScheduleId};
use crate::domains::scheduling::applier;
use crate::domains::scheduling::orchestrator::{self, RunWithMetrics};
use crate::domains::workforce::store::ApplySummary;
use crate::kernel::jobs::queue;

use super::super::app::AppState;
use super::super::middleware::{AuthUser, ManagerUser};

#[derive(Debug, Deserialize)]
pub struct OptimizeQuery {
    pub weekly_schedule_id: WeeklyScheduleId,
    pub config_id: Option<OptimizationConfigId>,
}

#[derive(Debug, Serialize)]
pub struct TriggerResponse {
    pub run_id: SchedulingRunId,
}

/// `POST /scheduling/optimize?weekly_schedule_id=&config_id=` — manager-only.
/// Persists a `pending` run and enqueues the background job; the solve
/// itself never runs inline (spec.md §4.4.2).
pub async fn trigger_optimization(
    State(state): State<AppState>,
    manager: ManagerUser,
    Query(query): Query<OptimizeQuery>,
) -> DomainResult<(StatusCode, Json<TriggerResponse>)> {
    let run_id = orchestrator::trigger(
        &state.db_pool,
        query.weekly_schedule_id,
        query.config_id,
        manager.0.employee_id,
    )
    .await?;
    queue::enqueue(&state.db_pool, run_id).await?;
    Ok((StatusCode::ACCEPTED, Json(TriggerResponse { run_id })))
}

pub async fn get_run_metrics(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(run_id): Path<SchedulingRunId>,
) -> DomainResult<Json<RunWithMetrics>> {
    Ok(Json(
        orchestrator::get_run_with_metrics(&state.db_pool, run_id).await?,
    ))
}

pub async fn list_runs_for_schedule(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(weekly_schedule_id): Path<WeeklyScheduleId>,
) -> DomainResult<Json<Vec<RunWithMetrics>>> {
    Ok(Json(
        orchestrator::list_runs(&state.db_pool, weekly_schedule_id).await?,
    ))
}

/// `POST /scheduling/runs/{run_id}/apply` — manager-only.
pub async fn apply_run(
    State(state): State<AppState>,
    manager: ManagerUser,
    Path(run_id): Path<SchedulingRunId>,
) -> DomainResult<Json<ApplySummary>> {
    Ok(Json(
        applier::apply(&state.db_pool, run_id, manager.0.employee_id).await?,
    ))
}
