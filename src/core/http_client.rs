use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, CONNECTION};
use reqwest::Client;
use crate::models::run_config::RunConfig;

/// Builds the one client every worker shares.
///
/// Each worker holds at most one connection at a time; the idle pool is sized
/// at ten connections per worker so pool exhaustion never queues a call.
pub fn build_client(config: &RunConfig) -> anyhow::Result<Client> {
    if config.url.scheme() == "https" {
        // certificate verification stays on, only the scheme is logged
        tracing::debug!(host = config.url.host_str(), "verifying TLS certificates for https target");
    }
    Client::builder()
        .user_agent(user_agent())
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .pool_max_idle_per_host(config.worker_count.saturating_mul(10))
        .http1_only()
        .build()
        .context("failed to build http client")
}

/// `api-tester <version> (<os>; <os version>)`
pub fn user_agent() -> String {
    let info = os_info::get();
    format!(
        "{} {} ({}; {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        info.os_type(),
        info.version()
    )
}

/// `Connection: keep-alive` when connections may be reused, `Connection: close` otherwise.
pub fn connection_headers(reuse_connects: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = if reuse_connects { "keep-alive" } else { "close" };
    headers.insert(CONNECTION, HeaderValue::from_static(value));
    headers
}
