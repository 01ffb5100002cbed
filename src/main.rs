use std::process::ExitCode;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use api_tester::core::show_result_with_table::show_result_with_table;
use api_tester::models::args::{normalize_legacy_flags, Args};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = match Args::try_parse_from(normalize_legacy_flags(std::env::args())) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };
    let json = args.json();
    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!("{}", Args::command().render_help());
            return ExitCode::from(2);
        }
    };

    match api_tester::run(config).await {
        Ok(report) if json => match serde_json::to_string_pretty(&report) {
            Ok(body) => {
                println!("{}", body);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
        Ok(report) => {
            show_result_with_table(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
