pub mod execute;
pub mod http_client;
pub mod partition;
pub mod result_collector;
pub mod show_result_with_table;
pub(crate) mod worker;
