use crate::domain::product::Product;
use crate::domain::sizing::{BatteryAutonomy, BatteryFormula};
use crate::services::sizing_types::SizingReport;

pub fn format_sizing_report(report: &SizingReport) -> String {
    let input = &report.input;
    let result = &report.result;

    let autonomy = match input.battery_autonomy {
        BatteryAutonomy::Days(days) => format!("{days:.2} days"),
        BatteryAutonomy::Hours(hours) => format!("{hours:.2} hours"),
    };
    let formula = match input.battery_formula {
        BatteryFormula::DepthOfDischarge => format!(
            "depth of discharge ({:.0} % usable)",
            input.depth_of_discharge * 100.0
        ),
        BatteryFormula::Simple => "simple".to_string(),
    };

    let mut lines = Vec::new();
    lines.push("Sizing Report".to_string());
    lines.push(format!("Mode: {}", report.mode.as_str()));
    lines.push(format!("Generated on: {}", report.generated_on));
    lines.push(format!("Monthly consumption: {:.2} kWh", input.monthly_consumption_kwh));
    lines.push(format!("Daily consumption: {:.2} kWh", report.daily_consumption_kwh));
    lines.push(format!("Peak sun hours: {:.2}", input.peak_sun_hours));
    lines.push(format!("Module wattage: {:.0} W", input.module_wattage));
    lines.push(format!("System losses: {:.2} %", input.system_loss_fraction * 100.0));
    lines.push(format!("Battery autonomy: {autonomy}"));
    lines.push(format!("Battery formula: {formula}"));
    lines.push(String::new());
    lines.push("Results:".to_string());
    lines.push("Quantity | Value | Unit".to_string());
    lines.push("---------|-------|-----".to_string());
    lines.push(format!("Panels | {} | modules", result.number_of_panels));
    lines.push(format_row("System size", Some(result.system_size_kw), "kW"));
    lines.push(format_row("Battery capacity", Some(result.battery_capacity_kwh), "kWh"));
    lines.push(format_row(
        "Daily production",
        Some(result.estimated_daily_production_kwh),
        "kWh",
    ));
    lines.push(format_row(
        "Monthly production",
        Some(result.estimated_monthly_production_kwh),
        "kWh",
    ));
    lines.push(format_row("Inverter size", result.inverter_size_kw, "kW"));
    if let Some(savings) = report.annual_savings {
        lines.push(format_row("Annual savings", Some(savings), "$"));
    }

    lines.join("\n")
}

fn format_row(label: &str, value: Option<f64>, unit: &str) -> String {
    let value = match value {
        Some(value) => format!("{value:.2}"),
        None => "n/a".to_string(),
    };
    format!("{label} | {value} | {unit}")
}

pub fn format_product_table(products: &[Product]) -> String {
    let mut lines = Vec::with_capacity(products.len() + 2);
    lines.push("ID | Name | Category | Price".to_string());
    lines.push("---|------|----------|------".to_string());
    for product in products {
        lines.push(format!(
            "{} | {} | {} | {}",
            product.id, product.details.name_en, product.details.category_en, product.details.price
        ));
    }
    lines.join("\n")
}
