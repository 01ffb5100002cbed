use serde::{Deserialize, Serialize};
use crate::models::http_error_stats::HttpErrorEntry;

/// Aggregate statistics of one finished run.
///
/// Latencies are milliseconds, `total_duration` is seconds. Every recorded call
/// contributes to the latency figures, whatever its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub url: String,
    // RFC 3339 start time
    pub started_at: String,
    pub total_concurrent_number: usize,
    pub total_calls: u64,
    pub recorded_calls: u64,
    pub successful_calls: u64,
    pub failed_status_calls: u64,
    pub failed_transport_calls: u64,
    /// Connection retries across all calls.
    pub total_retries: u64,
    pub success_rate: f64,
    pub total_duration: f64,
    pub average_response_time: f64,
    pub min_response_time: f64,
    pub max_response_time: f64,
    pub median_response_time: f64,
    pub response_time_95: f64,
    pub response_time_99: f64,
    pub rps: f64,
    pub total_response_bytes: u64,
    pub total_data_kb: f64,
    pub http_errors: Vec<HttpErrorEntry>,
}

impl RunReport {
    pub fn failed_calls(&self) -> u64 {
        self.failed_status_calls + self.failed_transport_calls
    }
}
