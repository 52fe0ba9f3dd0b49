// Common test utilities

pub mod harness;

pub use harness::TestHarness;

use std::sync::atomic::{AtomicU64, Ordering};

/// Appends a process-local, monotonically increasing suffix so fixtures that
/// hit a `UNIQUE` column (role/shift-template/optimization-config names)
/// don't collide across tests sharing one container-backed database.
pub fn unique(label: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{label}-{}-{n}", std::process::id())
}
