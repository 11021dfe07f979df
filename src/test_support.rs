use chrono::NaiveDate;

use crate::domain::product::ProductDetails;
use crate::domain::sizing::{BatteryAutonomy, CalculatorInput};
use crate::domain::sizing_mode::SizingMode;

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, but got {actual}"
    );
}

pub fn detailed_input(
    monthly_consumption_kwh: f64,
    peak_sun_hours: f64,
    module_wattage: f64,
    system_loss_fraction: f64,
    battery_autonomy: BatteryAutonomy,
) -> CalculatorInput {
    let mut input = SizingMode::Detailed
        .defaults()
        .input(monthly_consumption_kwh, peak_sun_hours);
    input.module_wattage = module_wattage;
    input.system_loss_fraction = system_loss_fraction;
    input.battery_autonomy = battery_autonomy;
    input
}

// Slider calculator: fixed 550 W modules at 80 % efficiency.
pub fn quick_input(monthly_consumption_kwh: f64, peak_sun_hours: f64, autonomy_hours: f64) -> CalculatorInput {
    let mut input = SizingMode::Quick
        .defaults()
        .input(monthly_consumption_kwh, peak_sun_hours);
    input.battery_autonomy = BatteryAutonomy::Hours(autonomy_hours);
    input
}

pub fn product_details(name: &str) -> ProductDetails {
    ProductDetails {
        name: name.to_string(),
        name_en: name.to_string(),
        price: "$100".to_string(),
        category: "Paneles Solares".to_string(),
        category_en: "Solar Panels".to_string(),
        ..ProductDetails::new()
    }
}
