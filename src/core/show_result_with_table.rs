use prettytable::{format, row, Cell, Row, Table};
use crate::models::result::RunReport;

pub fn show_result_with_table(result: &RunReport) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

    table.add_row(row!["Metric", "Value"]);
    table.add_row(row!["Total thread count", result.total_concurrent_number]);
    table.add_row(row!["Total calls", result.recorded_calls]);
    table.add_row(row!["Successful", result.successful_calls]);
    table.add_row(row!["Failed with status code", result.failed_status_calls]);
    table.add_row(row!["Request failed", result.failed_transport_calls]);
    table.add_row(row!["Connection retries", result.total_retries]);
    table.add_row(row!["Success rate", format!("{:.2}%", result.success_rate)]);
    table.add_row(row!["Total test time", format!("{:.2} s", result.total_duration)]);
    table.add_row(row!["Average response time", format!("{:.2} ms", result.average_response_time)]);
    table.add_row(row!["Min response time", format!("{:.2} ms", result.min_response_time)]);
    table.add_row(row!["Max response time", format!("{:.2} ms", result.max_response_time)]);
    table.add_row(row!["Median response time", format!("{:.2} ms", result.median_response_time)]);
    table.add_row(row!["95% response time", format!("{:.2} ms", result.response_time_95)]);
    table.add_row(row!["99% response time", format!("{:.2} ms", result.response_time_99)]);
    table.add_row(row!["Average requests per second", format!("{:.2}", result.rps)]);
    table.add_row(row!["Data received", format!("{:.2} kb", result.total_data_kb)]);
    println!("Results for {} (started {}):", result.url, result.started_at);
    table.printstd();

    if !result.http_errors.is_empty() {
        let mut errors_table = Table::new();
        errors_table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        errors_table.add_row(row!["Code", "Message", "Count"]);
        for e in &result.http_errors {
            errors_table.add_row(Row::new(vec![
                Cell::new(format!("{:03}", e.code).as_str()),
                Cell::new(&e.message).style_spec("R"),
                Cell::new(e.count.to_string().as_str()),
            ]));
        }
        println!("Errors:");
        errors_table.printstd();
    }
    println!("All threads have finished.");
}
