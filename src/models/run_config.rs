use std::time::Duration;
use reqwest::Url;

/// Validated settings for a single run, shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: Url,
    pub total_calls: u64,
    /// May exceed `total_calls`; the surplus workers get an empty quota.
    pub worker_count: usize,
    pub sleep_time: Duration,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Sends `Connection: keep-alive` instead of `Connection: close`.
    pub reuse_connects: bool,
    /// Skips draining the response body.
    pub keep_connects_open: bool,
    /// Extra attempts after a connection-level failure.
    pub max_retries: u32,
    /// Print one line per call to stdout.
    pub echo: bool,
}

impl RunConfig {
    pub const DEFAULT_TOTAL_CALLS: u64 = 10_000;
    pub const DEFAULT_WORKER_COUNT: usize = 16;
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(10_000);
    pub const DEFAULT_MAX_RETRIES: u32 = 5;

    pub fn new(url: Url) -> Self {
        RunConfig {
            url,
            total_calls: Self::DEFAULT_TOTAL_CALLS,
            worker_count: Self::DEFAULT_WORKER_COUNT,
            sleep_time: Duration::ZERO,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: Self::DEFAULT_REQUEST_TIMEOUT * 3,
            reuse_connects: false,
            keep_connects_open: false,
            max_retries: Self::DEFAULT_MAX_RETRIES,
            echo: true,
        }
    }
}
