pub mod args;
pub mod call_result;
pub mod http_error_stats;
pub mod result;
pub mod run_config;
pub mod worker_assignment;
