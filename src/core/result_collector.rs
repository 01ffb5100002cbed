use std::time::Duration;
use anyhow::Context;
use histogram::Histogram;
use parking_lot::Mutex;
use crate::models::call_result::{CallOutcome, CallResult};
use crate::models::http_error_stats::HttpErrorStats;
use crate::models::result::RunReport;
use crate::models::run_config::RunConfig;

/// Shared sink every worker reports its calls to.
///
/// One lock guards both the recorded state and the per-call console line, so
/// lines from different workers never interleave. The lock is held only for
/// the append itself, never across network I/O.
pub struct ResultCollector {
    echo: bool,
    state: Mutex<CollectorState>,
}

struct CollectorState {
    // milliseconds, in completion order
    response_times: Vec<f64>,
    successful: u64,
    failed_status: u64,
    failed_transport: u64,
    retries: u64,
    // microseconds
    histogram: Histogram,
    max_response_time: Duration,
    min_response_time: Duration,
    total_response_size: u64,
    http_errors: HttpErrorStats,
}

impl ResultCollector {
    pub fn new(echo: bool) -> anyhow::Result<Self> {
        let histogram = Histogram::new(7, 40).context("failed to create latency histogram")?;
        Ok(ResultCollector {
            echo,
            state: Mutex::new(CollectorState {
                response_times: Vec::new(),
                successful: 0,
                failed_status: 0,
                failed_transport: 0,
                retries: 0,
                histogram,
                max_response_time: Duration::ZERO,
                min_response_time: Duration::MAX,
                total_response_size: 0,
                http_errors: HttpErrorStats::new(),
            }),
        })
    }

    pub fn append(&self, result: CallResult) {
        let mut state = self.state.lock();
        if self.echo {
            println!("{}", result);
        }
        state.response_times.push(result.elapsed_ms());
        state.max_response_time = state.max_response_time.max(result.elapsed);
        state.min_response_time = state.min_response_time.min(result.elapsed);
        state.total_response_size += result.body_bytes;
        state.retries += u64::from(result.attempts.saturating_sub(1));
        let micros = u64::try_from(result.elapsed.as_micros()).unwrap_or(u64::MAX);
        if let Err(e) = state.histogram.increment(micros) {
            tracing::warn!(micros, error = %e, "latency outside histogram range");
        }
        let code = result.outcome.status_code();
        match result.outcome {
            CallOutcome::Success(_) => state.successful += 1,
            CallOutcome::FailedStatus(_) => {
                state.failed_status += 1;
                let reason = reqwest::StatusCode::from_u16(code)
                    .ok()
                    .and_then(|status| status.canonical_reason())
                    .unwrap_or("Unknown status");
                state.http_errors.increment(code, reason.to_string());
            }
            CallOutcome::FailedTransport(message) => {
                state.failed_transport += 1;
                state.http_errors.increment(code, message);
            }
        }
    }

    /// Number of calls recorded so far.
    pub(crate) fn len(&self) -> usize {
        self.state.lock().response_times.len()
    }

    /// Builds the final report. `total_duration` is the run's wall-clock time.
    pub fn summarize(&self, config: &RunConfig, total_duration: Duration, started_at: String) -> RunReport {
        let state = self.state.lock();
        let recorded_calls = state.response_times.len() as u64;
        let average_response_time = if state.response_times.is_empty() {
            0.0
        } else {
            state.response_times.iter().sum::<f64>() / state.response_times.len() as f64
        };
        let success_rate = if recorded_calls == 0 {
            0.0
        } else {
            state.successful as f64 / recorded_calls as f64 * 100.0
        };
        let rps = if total_duration.is_zero() {
            config.total_calls as f64
        } else {
            config.total_calls as f64 / total_duration.as_secs_f64()
        };
        let min_response_time = if recorded_calls == 0 {
            Duration::ZERO
        } else {
            state.min_response_time
        };

        RunReport {
            url: config.url.to_string(),
            started_at,
            total_concurrent_number: config.worker_count,
            total_calls: config.total_calls,
            recorded_calls,
            successful_calls: state.successful,
            failed_status_calls: state.failed_status,
            failed_transport_calls: state.failed_transport,
            total_retries: state.retries,
            success_rate,
            total_duration: total_duration.as_secs_f64(),
            average_response_time,
            min_response_time: min_response_time.as_secs_f64() * 1000.0,
            max_response_time: state.max_response_time.as_secs_f64() * 1000.0,
            median_response_time: percentile_ms(&state.histogram, 50.0),
            response_time_95: percentile_ms(&state.histogram, 95.0),
            response_time_99: percentile_ms(&state.histogram, 99.0),
            rps,
            total_response_bytes: state.total_response_size,
            total_data_kb: state.total_response_size as f64 / 1024.0,
            http_errors: state.http_errors.entries(),
        }
    }
}

fn percentile_ms(histogram: &Histogram, percentile: f64) -> f64 {
    match histogram.percentile(percentile) {
        Ok(bucket) => *bucket.range().start() as f64 / 1000.0,
        Err(_) => 0.0,
    }
}
