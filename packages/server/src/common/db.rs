//! Scoped unit-of-work helpers.
//!
//! C1 is the only component that touches the database. HTTP handlers hold a
//! request-scoped `PgPool` clone; the job worker holds a job-scoped clone of
//! the same pool. Both are just handles into the same connection pool, so
//! "scoping" here is about transaction lifetime, not connection ownership:
//! `transaction` opens a `sqlx::Transaction`, runs the closure, and commits
//! on `Ok` or rolls back on `Err` — mirroring the commit/rollback contract
//! the store's write methods require.

use std::future::Future;

use sqlx::{PgPool, Postgres, Transaction};

use super::error::StoreError;

pub async fn transaction<'a, F, Fut, T>(pool: &'a PgPool, f: F) -> Result<T, StoreError>
where
    F: FnOnce(&mut Transaction<'a, Postgres>) -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    let mut tx = pool.begin().await?;
    match f(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            // Best-effort: the transaction is dropped and rolled back
            // regardless, but an explicit rollback surfaces I/O errors early.
            let _ = tx.rollback().await;
            Err(err)
        }
    }
}
