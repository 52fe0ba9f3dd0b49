pub mod queue;
pub mod worker;

pub use queue::{JobStatus, ScheduledJob};
pub use worker::JobWorker;
