use std::process::ExitCode;

use chrono::Local;
use tracing::info;

use crate::services::sizing_types::build_sizing_report;
use crate::services::sizing_yaml::{
    load_sizing_request_from_yaml_file, serialize_sizing_report_to_yaml,
};

pub fn size_file_command(input: &str, output: &str) -> ExitCode {
    let request = match load_sizing_request_from_yaml_file(input) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Failed to load sizing request: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(input, mode = request.mode.as_str(), "loaded sizing request");

    let report = match build_sizing_report(&request, Local::now().date_naive()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Failed to size system: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut buffer = Vec::new();
    if let Err(e) = serialize_sizing_report_to_yaml(&mut buffer, &report) {
        eprintln!("Failed to serialize sizing report: {e}");
        return ExitCode::FAILURE;
    }

    if let Err(e) = std::fs::write(output, buffer) {
        eprintln!("Failed to write sizing report: {e}");
        ExitCode::FAILURE
    } else {
        println!(
            "Sizing report for {} panels written to {output}",
            report.result.number_of_panels
        );
        ExitCode::SUCCESS
    }
}
