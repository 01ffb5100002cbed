use std::time::Duration;
use anyhow::{bail, Context};
use clap::{ArgAction, Parser};
use reqwest::Url;
use crate::models::run_config::RunConfig;

/// Long flags that are also accepted with a single dash, e.g. `-totalCalls 500`.
const LEGACY_FLAGS: &[&str] = &[
    "totalCalls",
    "numThreads",
    "sleepTime",
    "requestTimeOut",
    "connectTimeOut",
    "reuseConnects",
    "keepConnectsOpen",
    "retries",
    "quiet",
    "json",
    "help",
];

#[derive(Parser, Debug)]
#[command(name = "api-tester", version, about = "Fire a fixed number of GET calls at a URL from concurrent workers", long_about = None, disable_help_flag = true)]
pub struct Args {
    /// Server URL
    #[arg(value_name = "URL")]
    pub(crate) url: String,

    /// Total number of calls across all threads
    #[arg(long = "totalCalls", default_value_t = RunConfig::DEFAULT_TOTAL_CALLS)]
    pub(crate) total_calls: u64,

    /// Number of threads
    #[arg(long = "numThreads", default_value_t = RunConfig::DEFAULT_WORKER_COUNT)]
    pub(crate) num_threads: usize,

    /// Sleep time in milliseconds between calls within a thread
    #[arg(long = "sleepTime", default_value_t = 0)]
    pub(crate) sleep_time: u64,

    /// HTTP request timeout in milliseconds
    #[arg(long = "requestTimeOut", default_value_t = 10_000)]
    pub(crate) request_time_out: u64,

    /// HTTP connection timeout in milliseconds [default: 3 x requestTimeOut]
    #[arg(long = "connectTimeOut")]
    pub(crate) connect_time_out: Option<u64>,

    /// Attempts to reuse the connections if the server allows it
    #[arg(long = "reuseConnects")]
    pub(crate) reuse_connects: bool,

    /// Leave response bodies unread, forcing a new connection with every request (not advised)
    #[arg(long = "keepConnectsOpen")]
    pub(crate) keep_connects_open: bool,

    /// Retries after a connection-level failure
    #[arg(long, default_value_t = RunConfig::DEFAULT_MAX_RETRIES)]
    pub(crate) retries: u32,

    /// Do not print a line per call
    #[arg(short, long)]
    pub(crate) quiet: bool,

    /// Print the final report as JSON (implies --quiet)
    #[arg(long)]
    pub(crate) json: bool,

    /// Display this help message
    #[arg(short = '?', long = "help", action = ArgAction::Help)]
    help: Option<bool>,
}

impl Args {
    pub fn json(&self) -> bool {
        self.json
    }

    pub fn into_config(self) -> anyhow::Result<RunConfig> {
        if !self.url.starts_with("http") {
            bail!("[URL] must be the first parameter and start with http, got '{}'", self.url);
        }
        let url = Url::parse(&self.url).with_context(|| format!("invalid URL '{}'", self.url))?;
        if self.num_threads == 0 {
            bail!("-numThreads must be at least 1");
        }
        if self.request_time_out == 0 {
            bail!("-requestTimeOut must be greater than 0");
        }
        if self.connect_time_out == Some(0) {
            bail!("-connectTimeOut must be greater than 0");
        }
        let request_timeout = Duration::from_millis(self.request_time_out);
        let connect_timeout = self
            .connect_time_out
            .map(Duration::from_millis)
            .unwrap_or(request_timeout * 3);

        Ok(RunConfig {
            url,
            total_calls: self.total_calls,
            worker_count: self.num_threads,
            sleep_time: Duration::from_millis(self.sleep_time),
            request_timeout,
            connect_timeout,
            reuse_connects: self.reuse_connects,
            keep_connects_open: self.keep_connects_open,
            max_retries: self.retries,
            echo: !(self.quiet || self.json),
        })
    }
}

/// Rewrites single-dash long flags into the double-dash form clap expects.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| match arg.strip_prefix('-') {
            Some(name) if !name.starts_with('-') && LEGACY_FLAGS.contains(&name) => format!("-{}", arg),
            _ => arg,
        })
        .collect()
}
