//! Concurrent HTTP GET load tester.
//!
//! A fixed budget of calls is split evenly over a pool of workers that share
//! one HTTP client. Each worker issues its calls one after another, every call
//! is timed and recorded whatever its outcome, and once all workers have
//! finished the timings are folded into a [`RunReport`].
use anyhow::Context;
use tokio::runtime::Runtime;

pub mod core;
pub mod models;

pub use crate::core::execute::run;
pub use crate::core::partition::partition;
pub use crate::core::result_collector::ResultCollector;
pub use crate::models::call_result::{CallOutcome, CallResult};
pub use crate::models::result::RunReport;
pub use crate::models::run_config::RunConfig;
pub use crate::models::worker_assignment::WorkerAssignment;

/// Runs [`run`] on a fresh multi-threaded runtime, for callers without one.
pub fn run_sync(config: RunConfig) -> anyhow::Result<RunReport> {
    let rt = Runtime::new().context("failed to start tokio runtime")?;
    rt.block_on(run(config))
}
