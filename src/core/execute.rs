use std::sync::Arc;
use std::time::Instant;
use anyhow::Context;
use futures::future::join_all;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use crate::core::http_client::build_client;
use crate::core::partition::partition;
use crate::core::result_collector::ResultCollector;
use crate::core::worker::Worker;
use crate::models::result::RunReport;
use crate::models::run_config::RunConfig;

/// Executes the whole call budget and returns the aggregate report.
///
/// Every worker gets its own task on the runtime, all sharing one client and
/// one collector. The report is built only after all of them have returned.
/// Failed calls never abort the run; an error here means the client could not
/// be built or a worker task died.
pub async fn run(config: RunConfig) -> anyhow::Result<RunReport> {
    let config = Arc::new(config);
    let client = build_client(&config)?;
    let collector = Arc::new(ResultCollector::new(config.echo)?);
    let assignments = partition(config.total_calls, config.worker_count);
    let started_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("failed to format start time")?;
    tracing::info!(
        url = %config.url,
        total_calls = config.total_calls,
        workers = config.worker_count,
        "starting run"
    );

    let test_start = Instant::now();
    let handles: Vec<_> = assignments
        .into_iter()
        .map(|assignment| {
            let worker = Worker::new(assignment, client.clone(), config.clone(), collector.clone());
            tokio::spawn(worker.run())
        })
        .collect();
    let executed = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.context("worker task failed"))
        .sum::<anyhow::Result<u64>>()?;
    let total_duration = test_start.elapsed();

    tracing::info!(executed, elapsed = ?total_duration, "all workers finished");
    debug_assert_eq!(executed, collector.len() as u64);
    Ok(collector.summarize(&config, total_duration, started_at))
}
