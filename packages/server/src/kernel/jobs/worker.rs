//! Polling worker loop (spec.md §4.4.2 and §5's dedicated worker pool),
//! grounded in the teacher's `kernel::jobs::worker::JobWorker` poll/execute/
//! ack cycle, adapted to a fixed poll interval rather than a cron scheduler.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::domains::scheduling::orchestrator;
use crate::domains::scheduling::solver::SolverBackend;

use super::queue;

/// One polling loop. `SCHEDULER_WORKER_CONCURRENCY` of these are spawned at
/// startup (spec.md §5: "a bounded worker pool... a worker occupies one
/// pool slot for the entire solve"), each holding its own job-scoped pool
/// handle — never one borrowed from an HTTP request (spec.md §4.1).
pub struct JobWorker {
    pool: PgPool,
    backend: Arc<dyn SolverBackend>,
    poll_interval: Duration,
    lease_seconds: i64,
}

impl JobWorker {
    pub fn new(
        pool: PgPool,
        backend: Arc<dyn SolverBackend>,
        poll_interval: Duration,
        lease_seconds: i64,
    ) -> Self {
        Self {
            pool,
            backend,
            poll_interval,
            lease_seconds,
        }
    }

    pub async fn run(self) {
        loop {
            match self.poll_once().await {
                Ok(true) => continue,
                Ok(false) => tokio::time::sleep(self.poll_interval).await,
                Err(err) => {
                    tracing::error!(error = %err, "scheduling job worker poll failed");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }

    /// Returns `Ok(true)` if a job was claimed and processed, so `run` can
    /// poll again immediately instead of sleeping a full interval.
    async fn poll_once(&self) -> anyhow::Result<bool> {
        let Some(job) = queue::claim_one(&self.pool, self.lease_seconds).await? else {
            return Ok(false);
        };

        tracing::info!(run_id = %job.scheduling_run_id, "executing scheduling run");
        match orchestrator::execute_run(&self.pool, job.scheduling_run_id, self.backend.as_ref())
            .await
        {
            Ok(()) => queue::mark_succeeded(&self.pool, job.id).await?,
            Err(err) => {
                tracing::error!(
                    run_id = %job.scheduling_run_id,
                    error = %err,
                    "scheduling run execution failed"
                );
                queue::mark_failed(&self.pool, job.id).await?;
            }
        }

        Ok(true)
    }
}
