use serde::{Deserialize, Serialize};

use crate::domain::sizing::{
    BatteryAutonomy, BatteryFormula, CalculatorInput, DEFAULT_DEPTH_OF_DISCHARGE,
    DEFAULT_INVERTER_SAFETY_MARGIN,
};

/// Which calculator the defaults are taken from.
///
/// `Detailed` is the form where every parameter is entered by hand, `Quick`
/// is the slider calculator that assumes 550 W modules at 80 % efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMode {
    #[default]
    Detailed,
    Quick,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingDefaults {
    pub module_wattage: f64,
    pub system_loss_fraction: f64,
    pub battery_autonomy: BatteryAutonomy,
    pub inverter_safety_margin: f64,
    pub depth_of_discharge: f64,
}

impl SizingMode {
    pub fn defaults(self) -> SizingDefaults {
        match self {
            SizingMode::Detailed => SizingDefaults {
                module_wattage: 400.0,
                system_loss_fraction: 0.15,
                battery_autonomy: BatteryAutonomy::Days(2.0),
                inverter_safety_margin: DEFAULT_INVERTER_SAFETY_MARGIN,
                depth_of_discharge: DEFAULT_DEPTH_OF_DISCHARGE,
            },
            SizingMode::Quick => SizingDefaults {
                module_wattage: 550.0,
                system_loss_fraction: 0.20,
                battery_autonomy: BatteryAutonomy::Hours(4.0),
                inverter_safety_margin: DEFAULT_INVERTER_SAFETY_MARGIN,
                depth_of_discharge: DEFAULT_DEPTH_OF_DISCHARGE,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SizingMode::Detailed => "detailed",
            SizingMode::Quick => "quick",
        }
    }
}

impl SizingDefaults {
    /// Builds a full input from the two values every calculator asks for.
    pub fn input(&self, monthly_consumption_kwh: f64, peak_sun_hours: f64) -> CalculatorInput {
        CalculatorInput {
            monthly_consumption_kwh,
            peak_sun_hours,
            module_wattage: self.module_wattage,
            system_loss_fraction: self.system_loss_fraction,
            battery_autonomy: self.battery_autonomy,
            peak_power_kw: None,
            inverter_safety_margin: self.inverter_safety_margin,
            depth_of_discharge: self.depth_of_discharge,
            battery_formula: BatteryFormula::default(),
        }
    }
}
