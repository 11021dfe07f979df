use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;

use crate::domain::sizing::{BatteryAutonomy, BatteryFormula, CalculatorInput, SizingError};
use crate::domain::sizing_mode::SizingMode;
use crate::services::sizing_types::{SizingReport, SizingRequest};

#[derive(Error, Debug)]
pub enum SizingYamlError {
    #[error("failed to read sizing request {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse sizing request: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error(transparent)]
    Sizing(#[from] SizingError),
}

/// Numeric fields are kept as raw YAML values so that a non-numeric entry is
/// reported as invalid input for that field instead of a generic parse error.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SizingRequestRecord {
    #[serde(default)]
    mode: SizingMode,
    monthly_consumption_kwh: Option<Value>,
    peak_sun_hours: Option<Value>,
    module_wattage: Option<Value>,
    system_loss_fraction: Option<Value>,
    battery_autonomy_days: Option<Value>,
    battery_autonomy_hours: Option<Value>,
    peak_power_kw: Option<Value>,
    inverter_safety_margin: Option<Value>,
    depth_of_discharge: Option<Value>,
    #[serde(default)]
    battery_formula: BatteryFormula,
    monthly_bill: Option<Value>,
}

pub fn load_sizing_request_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<SizingRequest, SizingYamlError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| SizingYamlError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    deserialize_sizing_request_from_yaml_str(&contents)
}

pub fn deserialize_sizing_request_from_yaml_str(
    input: &str,
) -> Result<SizingRequest, SizingYamlError> {
    let record: SizingRequestRecord = serde_yaml::from_str(input)?;
    let defaults = record.mode.defaults();

    let battery_autonomy = match (
        optional_number("battery_autonomy_days", record.battery_autonomy_days)?,
        optional_number("battery_autonomy_hours", record.battery_autonomy_hours)?,
    ) {
        (Some(_), Some(_)) => {
            return Err(SizingError::InvalidInput {
                field: "battery_autonomy",
                reason: "give either battery_autonomy_days or battery_autonomy_hours, not both"
                    .to_string(),
            }
            .into());
        }
        (Some(days), None) => BatteryAutonomy::Days(days),
        (None, Some(hours)) => BatteryAutonomy::Hours(hours),
        (None, None) => defaults.battery_autonomy,
    };

    let input = CalculatorInput {
        monthly_consumption_kwh: required_number(
            "monthly_consumption_kwh",
            record.monthly_consumption_kwh,
        )?,
        peak_sun_hours: required_number("peak_sun_hours", record.peak_sun_hours)?,
        module_wattage: optional_number("module_wattage", record.module_wattage)?
            .unwrap_or(defaults.module_wattage),
        system_loss_fraction: optional_number("system_loss_fraction", record.system_loss_fraction)?
            .unwrap_or(defaults.system_loss_fraction),
        battery_autonomy,
        peak_power_kw: optional_number("peak_power_kw", record.peak_power_kw)?,
        inverter_safety_margin: optional_number(
            "inverter_safety_margin",
            record.inverter_safety_margin,
        )?
        .unwrap_or(defaults.inverter_safety_margin),
        depth_of_discharge: optional_number("depth_of_discharge", record.depth_of_discharge)?
            .unwrap_or(defaults.depth_of_discharge),
        battery_formula: record.battery_formula,
    };

    Ok(SizingRequest {
        mode: record.mode,
        input,
        monthly_bill: optional_number("monthly_bill", record.monthly_bill)?,
    })
}

pub fn serialize_sizing_report_to_yaml<W: Write>(
    writer: &mut W,
    report: &SizingReport,
) -> io::Result<()> {
    let yaml = serde_yaml::to_string(report).map_err(io::Error::other)?;
    writer.write_all(yaml.as_bytes())
}

fn required_number(field: &'static str, value: Option<Value>) -> Result<f64, SizingError> {
    optional_number(field, value)?.ok_or_else(|| SizingError::InvalidInput {
        field,
        reason: "missing".to_string(),
    })
}

fn optional_number(field: &'static str, value: Option<Value>) -> Result<Option<f64>, SizingError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number.as_f64().map(Some).ok_or_else(|| {
            SizingError::InvalidInput {
                field,
                reason: format!("{number} is not a number"),
            }
        }),
        Some(other) => Err(SizingError::InvalidInput {
            field,
            reason: format!("{} is not a number", describe(&other)),
        }),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(text) => format!("'{text}'"),
        Value::Bool(flag) => flag.to_string(),
        Value::Sequence(_) => "a list".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        _ => "value".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::sizing_types::build_sizing_report;
    use crate::test_support::on_date;

    use assert_fs::prelude::*;

    #[test]
    fn optional_fields_fall_back_to_mode_defaults() {
        let request = deserialize_sizing_request_from_yaml_str(
            "mode: quick\nmonthly_consumption_kwh: 500\npeak_sun_hours: 5.0\n",
        )
        .unwrap();

        assert_eq!(request.mode, SizingMode::Quick);
        assert_eq!(request.input, SizingMode::Quick.defaults().input(500.0, 5.0));
        assert_eq!(request.monthly_bill, None);
    }

    #[test]
    fn mode_defaults_to_detailed() {
        let request = deserialize_sizing_request_from_yaml_str(
            "monthly_consumption_kwh: 300\npeak_sun_hours: 5.5\n",
        )
        .unwrap();

        assert_eq!(request.mode, SizingMode::Detailed);
        assert_eq!(request.input.module_wattage, 400.0);
        assert_eq!(request.input.battery_autonomy, BatteryAutonomy::Days(2.0));
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let yaml = r#"
mode: detailed
monthly_consumption_kwh: 300
peak_sun_hours: 5.5
module_wattage: 450
system_loss_fraction: 0.1
battery_autonomy_hours: 12
peak_power_kw: 3.5
inverter_safety_margin: 1.25
depth_of_discharge: 0.8
battery_formula: simple
monthly_bill: 120
"#;
        let request = deserialize_sizing_request_from_yaml_str(yaml).unwrap();

        assert_eq!(request.input.module_wattage, 450.0);
        assert_eq!(request.input.system_loss_fraction, 0.1);
        assert_eq!(request.input.battery_autonomy, BatteryAutonomy::Hours(12.0));
        assert_eq!(request.input.peak_power_kw, Some(3.5));
        assert_eq!(request.input.inverter_safety_margin, 1.25);
        assert_eq!(request.input.depth_of_discharge, 0.8);
        assert_eq!(request.input.battery_formula, BatteryFormula::Simple);
        assert_eq!(request.monthly_bill, Some(120.0));
    }

    #[test]
    fn battery_formula_accepts_the_dod_shorthand() {
        let request = deserialize_sizing_request_from_yaml_str(
            "monthly_consumption_kwh: 300\npeak_sun_hours: 5.5\nbattery_formula: dod\n",
        )
        .unwrap();

        assert_eq!(request.input.battery_formula, BatteryFormula::DepthOfDischarge);
    }

    #[test]
    fn missing_required_field_is_invalid_input() {
        let err = deserialize_sizing_request_from_yaml_str("peak_sun_hours: 5.5\n").unwrap_err();
        assert!(matches!(
            err,
            SizingYamlError::Sizing(SizingError::InvalidInput {
                field: "monthly_consumption_kwh",
                ..
            })
        ));
    }

    #[test]
    fn non_numeric_field_is_invalid_input() {
        let err = deserialize_sizing_request_from_yaml_str(
            "monthly_consumption_kwh: lots\npeak_sun_hours: 5.5\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SizingYamlError::Sizing(SizingError::InvalidInput {
                field: "monthly_consumption_kwh",
                ..
            })
        ));
        assert!(err.to_string().contains("'lots' is not a number"));
    }

    #[test]
    fn autonomy_in_both_units_is_rejected() {
        let err = deserialize_sizing_request_from_yaml_str(
            "monthly_consumption_kwh: 300\npeak_sun_hours: 5.5\nbattery_autonomy_days: 1\nbattery_autonomy_hours: 24\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SizingYamlError::Sizing(SizingError::InvalidInput {
                field: "battery_autonomy",
                ..
            })
        ));
    }

    #[test]
    fn unknown_keys_and_modes_are_parse_errors() {
        let err = deserialize_sizing_request_from_yaml_str(
            "monthly_consumption_kwh: 300\npeak_sun_hours: 5.5\nroof: flat\n",
        )
        .unwrap_err();
        assert!(matches!(err, SizingYamlError::Parse(_)));

        let err = deserialize_sizing_request_from_yaml_str(
            "mode: turbo\nmonthly_consumption_kwh: 300\npeak_sun_hours: 5.5\n",
        )
        .unwrap_err();
        assert!(matches!(err, SizingYamlError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let missing = temp.path().join("request.yaml");

        let err = load_sizing_request_from_yaml_file(&missing).unwrap_err();
        assert!(matches!(err, SizingYamlError::Read { path, .. } if path == missing));
    }

    #[test]
    fn loads_request_from_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("request.yaml");
        file.write_str("monthly_consumption_kwh: 300\npeak_sun_hours: 5.5\n")
            .unwrap();

        let request = load_sizing_request_from_yaml_file(file.path()).unwrap();
        assert_eq!(request.input.monthly_consumption_kwh, 300.0);
    }

    #[test]
    fn serialized_report_contains_result_fields() {
        let request = deserialize_sizing_request_from_yaml_str(
            "mode: quick\nmonthly_consumption_kwh: 500\npeak_sun_hours: 5.0\nmonthly_bill: 150\n",
        )
        .unwrap();
        let report = build_sizing_report(&request, on_date(2026, 2, 9)).unwrap();

        let mut buf = Vec::new();
        serialize_sizing_report_to_yaml(&mut buf, &report).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("mode: quick"));
        assert!(output.contains("2026-02-09"));
        assert!(output.contains("number_of_panels: 8"));
        assert!(output.contains("system_size_kw: 4.4"));
        assert!(output.contains("battery_capacity_kwh: 3.09"));
        assert!(output.contains("unit: hours"));
        assert!(output.contains("annual_savings: 1440.0"));
    }
}
