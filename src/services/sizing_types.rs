use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::savings::estimate_annual_savings;
use crate::domain::sizing::{
    CalculatorInput, CalculatorResult, SizingError, compute_sizing, daily_consumption_kwh, round2,
};
use crate::domain::sizing_mode::SizingMode;

/// One sizing run as requested from the command line or a YAML file.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingRequest {
    pub mode: SizingMode,
    pub input: CalculatorInput,
    pub monthly_bill: Option<f64>,
}

#[derive(Serialize, Debug, Clone)]
pub struct SizingReport {
    pub mode: SizingMode,
    pub generated_on: String,
    pub input: CalculatorInput,
    pub daily_consumption_kwh: f64,
    pub result: CalculatorResult,
    pub annual_savings: Option<f64>,
}

pub fn build_sizing_report(
    request: &SizingRequest,
    generated_on: NaiveDate,
) -> Result<SizingReport, SizingError> {
    let result = compute_sizing(&request.input)?;
    let annual_savings = request
        .monthly_bill
        .map(estimate_annual_savings)
        .transpose()?;

    Ok(SizingReport {
        mode: request.mode,
        generated_on: generated_on.format("%Y-%m-%d").to_string(),
        input: request.input.clone(),
        daily_consumption_kwh: round2(daily_consumption_kwh(request.input.monthly_consumption_kwh)),
        result,
        annual_savings,
    })
}
