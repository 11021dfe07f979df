use std::process::ExitCode;

use chrono::Local;
use tracing::debug;

use crate::commands::base_commands::{QuickArgs, SizeArgs};
use crate::commands::report_format::format_sizing_report;
use crate::domain::sizing::BatteryAutonomy;
use crate::domain::sizing_mode::SizingMode;
use crate::services::sizing_types::{SizingRequest, build_sizing_report};
use crate::services::sizing_yaml::serialize_sizing_report_to_yaml;

pub fn size_command(args: SizeArgs) -> ExitCode {
    let defaults = SizingMode::Detailed.defaults();
    let mut input = defaults.input(args.site.monthly_consumption, args.site.sun_hours);
    input.module_wattage = args.module_wattage.unwrap_or(defaults.module_wattage);
    if let Some(losses) = args.losses {
        input.system_loss_fraction = losses / 100.0;
    }
    input.battery_autonomy = match (args.autonomy_days, args.autonomy_hours) {
        (Some(days), _) => BatteryAutonomy::Days(days),
        (None, Some(hours)) => BatteryAutonomy::Hours(hours),
        (None, None) => defaults.battery_autonomy,
    };
    input.peak_power_kw = args.site.peak_power;
    input.inverter_safety_margin = args
        .safety_margin
        .unwrap_or(defaults.inverter_safety_margin);
    input.depth_of_discharge = args
        .depth_of_discharge
        .unwrap_or(defaults.depth_of_discharge);
    input.battery_formula = args.battery_formula;

    let request = SizingRequest {
        mode: SizingMode::Detailed,
        input,
        monthly_bill: None,
    };
    run_sizing(&request, args.site.output.as_deref())
}

pub fn quick_command(args: QuickArgs) -> ExitCode {
    let defaults = SizingMode::Quick.defaults();
    let mut input = defaults.input(args.site.monthly_consumption, args.site.sun_hours);
    if let Some(hours) = args.autonomy_hours {
        input.battery_autonomy = BatteryAutonomy::Hours(hours);
    }
    input.peak_power_kw = args.site.peak_power;

    let request = SizingRequest {
        mode: SizingMode::Quick,
        input,
        monthly_bill: args.monthly_bill,
    };
    run_sizing(&request, args.site.output.as_deref())
}

fn run_sizing(request: &SizingRequest, output: Option<&str>) -> ExitCode {
    debug!(mode = request.mode.as_str(), input = ?request.input, "sizing request");
    let report = match build_sizing_report(request, Local::now().date_naive()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Failed to size system: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", format_sizing_report(&report));

    if let Some(output) = output {
        let mut buffer = Vec::new();
        if let Err(e) = serialize_sizing_report_to_yaml(&mut buffer, &report) {
            eprintln!("Failed to serialize sizing report: {e}");
            return ExitCode::FAILURE;
        }
        if let Err(e) = std::fs::write(output, buffer) {
            eprintln!("Failed to write sizing report: {e}");
            return ExitCode::FAILURE;
        }
        println!("Sizing report written to {output}");
    }
    ExitCode::SUCCESS
}
