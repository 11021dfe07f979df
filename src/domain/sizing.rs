use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flat month length used for all daily/monthly conversions.
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const HOURS_PER_DAY: f64 = 24.0;
pub const DEFAULT_INVERTER_SAFETY_MARGIN: f64 = 1.20;
pub const DEFAULT_DEPTH_OF_DISCHARGE: f64 = 0.90;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("effective energy per panel is {energy_per_panel_kwh} kWh, cannot size panels")]
    DivisionByZero { energy_per_panel_kwh: f64 },
}

/// Desired backup duration of the battery bank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum BatteryAutonomy {
    Days(f64),
    Hours(f64),
}

impl BatteryAutonomy {
    pub fn as_hours(&self) -> f64 {
        match *self {
            BatteryAutonomy::Days(days) => days * HOURS_PER_DAY,
            BatteryAutonomy::Hours(hours) => hours,
        }
    }

    pub fn as_days(&self) -> f64 {
        match *self {
            BatteryAutonomy::Days(days) => days,
            BatteryAutonomy::Hours(hours) => hours / HOURS_PER_DAY,
        }
    }

    fn raw_value(&self) -> f64 {
        match *self {
            BatteryAutonomy::Days(value) | BatteryAutonomy::Hours(value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BatteryFormula {
    /// Usable-capacity corrected sizing.
    #[default]
    #[value(name = "dod")]
    #[serde(alias = "dod")]
    DepthOfDischarge,
    /// `daily consumption x autonomy days`, ignoring depth of discharge.
    Simple,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorInput {
    pub monthly_consumption_kwh: f64,
    pub peak_sun_hours: f64,
    pub module_wattage: f64,
    pub system_loss_fraction: f64,
    pub battery_autonomy: BatteryAutonomy,
    pub peak_power_kw: Option<f64>,
    pub inverter_safety_margin: f64,
    pub depth_of_discharge: f64,
    pub battery_formula: BatteryFormula,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorResult {
    pub number_of_panels: u32,
    pub system_size_kw: f64,
    pub battery_capacity_kwh: f64,
    pub estimated_daily_production_kwh: f64,
    pub estimated_monthly_production_kwh: f64,
    pub inverter_size_kw: Option<f64>,
}

pub fn daily_consumption_kwh(monthly_consumption_kwh: f64) -> f64 {
    monthly_consumption_kwh / DAYS_PER_MONTH
}

/// Daily energy a single module yields after system losses.
pub fn energy_per_panel_kwh(module_wattage: f64, peak_sun_hours: f64, system_loss_fraction: f64) -> f64 {
    (module_wattage * peak_sun_hours * (1.0 - system_loss_fraction)) / 1000.0
}

pub fn battery_capacity_simple_kwh(daily_consumption_kwh: f64, autonomy_days: f64) -> f64 {
    daily_consumption_kwh * autonomy_days
}

pub fn battery_capacity_dod_kwh(daily_consumption_kwh: f64, autonomy_hours: f64, depth_of_discharge: f64) -> f64 {
    (daily_consumption_kwh / HOURS_PER_DAY * autonomy_hours) / depth_of_discharge
}

pub fn inverter_size_kw(peak_power_kw: f64, inverter_safety_margin: f64) -> f64 {
    peak_power_kw * inverter_safety_margin
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sizes panels, battery and (optionally) inverter for the given profile.
///
/// Every field is validated before any arithmetic happens. A zero effective
/// yield per panel (no sun, or losses of 100 %) is reported as
/// [`SizingError::DivisionByZero`] rather than producing an infinite count.
pub fn compute_sizing(input: &CalculatorInput) -> Result<CalculatorResult, SizingError> {
    validate(input)?;

    let daily = daily_consumption_kwh(input.monthly_consumption_kwh);
    let per_panel = energy_per_panel_kwh(
        input.module_wattage,
        input.peak_sun_hours,
        input.system_loss_fraction,
    );
    if per_panel <= 0.0 {
        return Err(SizingError::DivisionByZero {
            energy_per_panel_kwh: per_panel,
        });
    }
    if !per_panel.is_finite() {
        return Err(invalid(
            "module_wattage",
            "energy per panel exceeds the representable range".to_string(),
        ));
    }

    let panels = (daily / per_panel).ceil();
    if panels > u32::MAX as f64 {
        return Err(SizingError::InvalidInput {
            field: "monthly_consumption_kwh",
            reason: format!("requires {panels} panels, which is more than can be counted"),
        });
    }
    let number_of_panels = panels as u32;

    let system_size_kw = number_of_panels as f64 * input.module_wattage / 1000.0;
    let battery_capacity_kwh = match input.battery_formula {
        BatteryFormula::DepthOfDischarge => battery_capacity_dod_kwh(
            daily,
            input.battery_autonomy.as_hours(),
            input.depth_of_discharge,
        ),
        BatteryFormula::Simple => {
            battery_capacity_simple_kwh(daily, input.battery_autonomy.as_days())
        }
    };
    let daily_production = number_of_panels as f64 * per_panel;
    let monthly_production = daily_production * DAYS_PER_MONTH;

    let inverter = input
        .peak_power_kw
        .map(|peak| inverter_size_kw(peak, input.inverter_safety_margin));

    Ok(CalculatorResult {
        number_of_panels,
        system_size_kw: finite_output("module_wattage", system_size_kw)?,
        battery_capacity_kwh: finite_output("battery_autonomy", battery_capacity_kwh)?,
        estimated_daily_production_kwh: finite_output("module_wattage", daily_production)?,
        estimated_monthly_production_kwh: finite_output("module_wattage", monthly_production)?,
        inverter_size_kw: inverter
            .map(|size| finite_output("peak_power_kw", size))
            .transpose()?,
    })
}

/// Rounds a computed quantity, rejecting results that overflowed to infinity.
fn finite_output(field: &'static str, value: f64) -> Result<f64, SizingError> {
    if value.is_finite() {
        Ok(round2(value))
    } else {
        Err(invalid(
            field,
            format!("value is too large, the result overflows to {value}"),
        ))
    }
}

fn validate(input: &CalculatorInput) -> Result<(), SizingError> {
    require_positive("monthly_consumption_kwh", input.monthly_consumption_kwh)?;
    // Zero sun hours is a valid reading; it surfaces as DivisionByZero.
    require_non_negative("peak_sun_hours", input.peak_sun_hours)?;
    require_positive("module_wattage", input.module_wattage)?;
    require_finite("system_loss_fraction", input.system_loss_fraction)?;
    if !(0.0..=1.0).contains(&input.system_loss_fraction) {
        return Err(invalid(
            "system_loss_fraction",
            format!("{} is outside [0, 1]", input.system_loss_fraction),
        ));
    }
    require_non_negative("battery_autonomy", input.battery_autonomy.raw_value())?;
    if let Some(peak) = input.peak_power_kw {
        require_positive("peak_power_kw", peak)?;
    }
    require_positive("inverter_safety_margin", input.inverter_safety_margin)?;
    require_positive("depth_of_discharge", input.depth_of_discharge)?;
    if input.depth_of_discharge > 1.0 {
        return Err(invalid(
            "depth_of_discharge",
            format!("{} is greater than 1", input.depth_of_discharge),
        ));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: String) -> SizingError {
    SizingError::InvalidInput { field, reason }
}

fn require_finite(field: &'static str, value: f64) -> Result<(), SizingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is not a number")))
    }
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), SizingError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be greater than zero")))
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), SizingError> {
    require_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must not be negative")))
    }
}
