use std::pin::pin;
use std::sync::Arc;
use std::time::Instant;
use futures::StreamExt;
use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use crate::core::http_client::connection_headers;
use crate::core::result_collector::ResultCollector;
use crate::models::call_result::{CallOutcome, CallResult};
use crate::models::run_config::RunConfig;
use crate::models::worker_assignment::WorkerAssignment;

/// Runs one worker's quota, one call at a time.
pub(crate) struct Worker {
    assignment: WorkerAssignment,
    client: Client,
    config: Arc<RunConfig>,
    collector: Arc<ResultCollector>,
    headers: HeaderMap,
}

impl Worker {
    pub(crate) fn new(
        assignment: WorkerAssignment,
        client: Client,
        config: Arc<RunConfig>,
        collector: Arc<ResultCollector>,
    ) -> Self {
        let headers = connection_headers(config.reuse_connects);
        Worker {
            assignment,
            client,
            config,
            collector,
            headers,
        }
    }

    /// Returns the number of calls executed, which always equals the quota.
    pub(crate) async fn run(self) -> u64 {
        let quota = self.assignment.calls;
        tracing::debug!(worker = self.assignment.worker_id, quota, "worker started");
        for call_index in 0..quota {
            let result = self.call(call_index).await;
            self.collector.append(result);
            if call_index + 1 < quota && !self.config.sleep_time.is_zero() {
                tokio::time::sleep(self.config.sleep_time).await;
            }
        }
        tracing::debug!(worker = self.assignment.worker_id, "worker finished");
        quota
    }

    // The clock stops once the body has been read, or at the first failure.
    // With keep_connects_open the body is left unread and the clock stops at
    // the response head.
    async fn call(&self, call_index: u64) -> CallResult {
        let start = Instant::now();
        let (sent, attempts) = self.send().await;
        let (outcome, body_bytes) = match sent {
            Ok(response) => {
                let status = response.status();
                let body = if self.config.keep_connects_open {
                    Ok(0)
                } else {
                    drain(response).await
                };
                match body {
                    Ok(body_bytes) if status == StatusCode::OK => (CallOutcome::Success(status.as_u16()), body_bytes),
                    Ok(body_bytes) => (CallOutcome::FailedStatus(status.as_u16()), body_bytes),
                    Err(e) => (transport_failure(e), 0),
                }
            }
            Err(e) => (transport_failure(e), 0),
        };
        CallResult {
            worker_id: self.assignment.worker_id,
            call_index,
            elapsed: start.elapsed(),
            outcome,
            body_bytes,
            attempts,
        }
    }

    // connection-level failures are retried, the caller's clock keeps running
    async fn send(&self) -> (reqwest::Result<Response>, u32) {
        let mut attempts = 1;
        loop {
            let request = self.client.get(self.config.url.clone()).headers(self.headers.clone());
            match request.send().await {
                Err(e) if e.is_connect() && attempts <= self.config.max_retries => {
                    tracing::debug!(worker = self.assignment.worker_id, attempts, error = %e, "retrying after connection failure");
                    attempts += 1;
                }
                res => return (res, attempts),
            }
        }
    }
}

// Reading the body to the end hands the connection back to the pool
// instead of leaving it busy until the server times it out.
async fn drain(response: Response) -> reqwest::Result<u64> {
    let mut total = 0u64;
    let mut body = pin!(response.bytes_stream());
    while let Some(chunk) = body.next().await {
        total += chunk?.len() as u64;
    }
    Ok(total)
}

fn transport_failure(e: reqwest::Error) -> CallOutcome {
    CallOutcome::FailedTransport(format!("{:#}", anyhow::Error::from(e)))
}
