use crate::domain::sizing::{SizingError, require_positive, round2};

/// Share of the electricity bill a sized system is expected to offset.
pub const BILL_OFFSET_FRACTION: f64 = 0.8;

pub fn estimate_annual_savings(monthly_bill: f64) -> Result<f64, SizingError> {
    require_positive("monthly_bill", monthly_bill)?;
    Ok(round2(monthly_bill * 12.0 * BILL_OFFSET_FRACTION))
}
