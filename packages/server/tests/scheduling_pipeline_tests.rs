//! Integration tests against a real Postgres instance, covering the parts of
//! the pipeline that pure unit tests can't reach: multi-row transactions,
//! `ON CONFLICT` semantics, and status transitions driven by SQL rather than
//! in-memory state.

mod common;

use chrono::NaiveDate;
use common::{unique, TestHarness};
use server_core::domains::activity::store as activity_store;
use server_core::domains::workforce::model::{EmployeeStatus, PlannedShiftStatus};
use server_core::domains::workforce::store::{self, NewSolutionRow};
use server_core::kernel::jobs::queue;

async fn seed_shift(
    harness: &TestHarness,
) -> anyhow::Result<(
    server_core::common::id::WeeklyScheduleId,
    server_core::common::id::PlannedShiftId,
    server_core::common::id::EmployeeId,
    server_core::common::id::RoleId,
)> {
    let pool = &harness.db_pool;

    let employee = store::create_employee(pool, "Jordan Rivera", EmployeeStatus::Active, true).await?;
    let role = store::create_role(pool, &unique("barista")).await?;
    store::assign_employee_role(pool, employee.id, role.id).await?;

    let template = store::create_shift_template(
        pool,
        &unique("morning"),
        Some(chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap()),
        Some(chrono::NaiveTime::from_hms_opt(16, 0, 0).unwrap()),
        Some("Main St"),
        &[(role.id, 1)],
    )
    .await?;

    let schedule =
        store::create_weekly_schedule(pool, NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(), employee.id)
            .await?;

    let shift = store::create_planned_shift(
        pool,
        schedule.id,
        template.id,
        NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
        None,
    )
    .await?;

    Ok((schedule.id, shift.id, employee.id, role.id))
}

#[tokio::test]
async fn apply_solution_fills_required_roles_and_marks_shift_fully_assigned() {
    let harness = TestHarness::new().await.expect("harness");
    let pool = &harness.db_pool;
    let (schedule_id, shift_id, employee_id, role_id) =
        seed_shift(&harness).await.expect("seed");

    let config = store::create_optimization_config(
        pool,
        &unique("default-config"),
        1.0,
        1.0,
        0.1,
        1.0,
        30,
        0.01,
        true,
    )
    .await
    .expect("create config");

    let run_id = store::create_run(pool, schedule_id, config.id)
        .await
        .expect("create run");

    store::insert_solutions(
        pool,
        run_id,
        vec![NewSolutionRow {
            planned_shift_id: shift_id,
            employee_id,
            role_id,
            preference_score: 0.8,
        }],
    )
    .await
    .expect("insert solutions");

    let summary = store::apply_solution(pool, run_id).await.expect("apply");
    assert_eq!(summary.shifts_affected, 1);
    assert_eq!(summary.assignments_created, 1);

    let shift = store::get_weekly_schedule(pool, schedule_id)
        .await
        .expect("reload schedule");
    assert_eq!(shift.id, schedule_id);

    let assignments = store::list_shift_assignments(pool, schedule_id)
        .await
        .expect("list assignments");
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].planned_shift_id, shift_id);

    let shifts = store::list_planned_shifts(pool, schedule_id)
        .await
        .expect("list shifts");
    let applied_shift = shifts.into_iter().find(|s| s.id == shift_id).unwrap();
    assert_eq!(applied_shift.status, PlannedShiftStatus::FullyAssigned);
}

/// Applying the same run twice must not duplicate assignment rows —
/// `apply_solution` deletes and reinserts within one transaction, so it's
/// safe to retry after a crash between "solved" and "applied".
#[tokio::test]
async fn apply_solution_is_idempotent_on_retry() {
    let harness = TestHarness::new().await.expect("harness");
    let pool = &harness.db_pool;
    let (schedule_id, shift_id, employee_id, role_id) =
        seed_shift(&harness).await.expect("seed");

    let config = store::create_optimization_config(
        pool,
        &unique("retry-config"),
        1.0,
        1.0,
        0.1,
        1.0,
        30,
        0.01,
        false,
    )
    .await
    .expect("create config");

    let run_id = store::create_run(pool, schedule_id, config.id)
        .await
        .expect("create run");

    store::insert_solutions(
        pool,
        run_id,
        vec![NewSolutionRow {
            planned_shift_id: shift_id,
            employee_id,
            role_id,
            preference_score: 0.5,
        }],
    )
    .await
    .expect("insert solutions");

    store::apply_solution(pool, run_id).await.expect("first apply");
    store::apply_solution(pool, run_id).await.expect("second apply");

    let assignments = store::list_shift_assignments(pool, schedule_id)
        .await
        .expect("list assignments");
    assert_eq!(assignments.len(), 1);
}

#[tokio::test]
async fn approve_time_off_request_rejects_already_approved_request() {
    let harness = TestHarness::new().await.expect("harness");
    let pool = &harness.db_pool;

    let employee =
        store::create_employee(pool, "Sam Okafor", EmployeeStatus::Active, false)
            .await
            .expect("create employee");

    let request = store::create_time_off_request(
        pool,
        employee.id,
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 9, 3).unwrap(),
    )
    .await
    .expect("create request");

    store::approve_time_off_request(pool, request.id)
        .await
        .expect("first approval succeeds");

    let second = store::approve_time_off_request(pool, request.id).await;
    assert!(second.is_err(), "re-approving an approved request must fail");
}

#[tokio::test]
async fn create_role_rejects_duplicate_names() {
    let harness = TestHarness::new().await.expect("harness");
    let pool = &harness.db_pool;
    let name = unique("shift-lead");

    store::create_role(pool, &name).await.expect("first create");
    let second = store::create_role(pool, &name).await;
    assert!(second.is_err(), "duplicate role name must be rejected");
}

#[tokio::test]
async fn activity_log_records_entries_in_reverse_chronological_order() {
    let harness = TestHarness::new().await.expect("harness");
    let pool = &harness.db_pool;
    let employee =
        store::create_employee(pool, "Priya Anand", EmployeeStatus::Active, true)
            .await
            .expect("create employee");

    activity_store::log_activity(
        pool,
        server_core::domains::activity::model::ActivityActionType::Create,
        server_core::domains::activity::model::ActivityEntityType::Schedule,
        1,
        Some(employee.id),
        Some("first entry".to_string()),
    )
    .await
    .expect("log first");

    activity_store::log_activity(
        pool,
        server_core::domains::activity::model::ActivityActionType::Publish,
        server_core::domains::activity::model::ActivityEntityType::Schedule,
        1,
        Some(employee.id),
        Some("second entry".to_string()),
    )
    .await
    .expect("log second");

    let recent = activity_store::list_recent(pool, 2).await.expect("list recent");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].details.as_deref(), Some("second entry"));
}

/// A job claimed once and never completed (lease expired) must be claimable
/// again, and the run it points at must already be `failed` with the
/// documented message before the retry hands it back out.
#[tokio::test]
async fn claim_one_reclaims_an_orphaned_job_and_fails_its_run() {
    let harness = TestHarness::new().await.expect("harness");
    let pool = &harness.db_pool;
    let (schedule_id, _shift_id, employee_id, _role_id) =
        seed_shift(&harness).await.expect("seed");

    let config = store::create_optimization_config(
        pool,
        &unique("orphan-config"),
        1.0,
        1.0,
        0.1,
        1.0,
        30,
        0.01,
        false,
    )
    .await
    .expect("create config");

    let run_id = store::create_run(pool, schedule_id, config.id)
        .await
        .expect("create run");
    store::update_run(
        pool,
        run_id,
        store::RunUpdate {
            status: Some(
                server_core::domains::workforce::model::SchedulingRunStatus::Running,
            ),
            ..Default::default()
        },
    )
    .await
    .expect("mark run running");

    queue::enqueue(pool, run_id).await.expect("enqueue");

    // Negative lease: the freshly claimed row is immediately expired.
    let first_claim = queue::claim_one(pool, -1).await.expect("first claim");
    assert!(first_claim.is_some());

    let second_claim = queue::claim_one(pool, 600)
        .await
        .expect("second claim")
        .expect("orphaned job is reclaimable");
    assert_eq!(second_claim.scheduling_run_id, run_id);

    let run = store::get_run(pool, run_id).await.expect("reload run");
    assert_eq!(
        run.status,
        server_core::domains::workforce::model::SchedulingRunStatus::Failed
    );
    assert_eq!(run.error_message.as_deref(), Some("worker lease expired"));

    let _ = employee_id;
}
