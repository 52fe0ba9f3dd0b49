//! Postgres-backed job queue for scheduling runs (spec.md §4.4.2's "task
//! queue interface, not inline"), adapted from the teacher's
//! `kernel::jobs::queue::PostgresJobQueue` and stripped to the single job
//! type this service needs — no idempotency keys, no cron recurrence, no
//! dead-lettering, since spec.md only asks for "idempotent-by-run".

use chrono::{Duration, NaiveDateTime, Utc};
use sqlx::PgPool;

use crate::common::error::StoreResult;
use crate::common::id::SchedulingRunId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "scheduling_job_status", rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScheduledJob {
    pub id: i64,
    pub scheduling_run_id: SchedulingRunId,
    pub status: JobStatus,
    pub lease_expires_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

pub async fn enqueue(pool: &PgPool, run_id: SchedulingRunId) -> StoreResult<()> {
    sqlx::query("INSERT INTO scheduling_jobs (scheduling_run_id, status) VALUES ($1, 'pending')")
        .bind(run_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Claims one claimable job: pending, or `running` with an expired lease.
/// The latter clause resolves spec.md §9's orphan-recovery open question —
/// SPEC_FULL treats a `running` job whose worker never renewed its lease as
/// abandoned. Reclaiming it first marks the orphaned run `failed` with
/// `error_message = "worker lease expired"` (SPEC_FULL §9), then hands the
/// job to whichever worker polls next; re-running from scratch is always
/// safe since C1-C3 are stateless per call (spec.md §5).
///
/// `FOR UPDATE SKIP LOCKED` means concurrent workers never block on, or
/// double-claim, the same row.
pub async fn claim_one(pool: &PgPool, lease_seconds: i64) -> StoreResult<Option<ScheduledJob>> {
    let mut tx = pool.begin().await?;
    let job: Option<ScheduledJob> = sqlx::query_as(
        "SELECT * FROM scheduling_jobs
         WHERE status = 'pending'
            OR (status = 'running' AND lease_expires_at < NOW())
         ORDER BY created_at
         FOR UPDATE SKIP LOCKED
         LIMIT 1",
    )
    .fetch_optional(&mut *tx)
    .await?;

    let Some(job) = job else {
        tx.commit().await?;
        return Ok(None);
    };

    if job.status == JobStatus::Running {
        sqlx::query(
            "UPDATE scheduling_runs SET status = 'failed', error_message = 'worker lease expired'
             WHERE id = $1 AND status = 'running'",
        )
        .bind(job.scheduling_run_id)
        .execute(&mut *tx)
        .await?;
    }

    let lease_expires_at = Utc::now().naive_utc() + Duration::seconds(lease_seconds);
    sqlx::query(
        "UPDATE scheduling_jobs SET status = 'running', lease_expires_at = $2 WHERE id = $1",
    )
    .bind(job.id)
    .bind(lease_expires_at)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(Some(ScheduledJob {
        status: JobStatus::Running,
        lease_expires_at: Some(lease_expires_at),
        ..job
    }))
}

pub async fn mark_succeeded(pool: &PgPool, job_id: i64) -> StoreResult<()> {
    sqlx::query("UPDATE scheduling_jobs SET status = 'succeeded' WHERE id = $1")
        .bind(job_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn mark_failed(pool: &PgPool, job_id: i64) -> StoreResult<()> {
    sqlx::query("UPDATE scheduling_jobs SET status = 'failed' WHERE id = $1")
        .bind(job_id)
        .execute(pool)
        .await?;
    Ok(())
}
