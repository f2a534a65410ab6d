//! Future value of an ordinary annuity
//!
//! Deposits are made at the end of each month and compound monthly.

pub const MONTHS_PER_YEAR: u32 = 12;

/// Convert an annual return in percent to a monthly fractional rate
pub fn monthly_rate(annual_percent: f64) -> f64 {
    annual_percent / 100.0 / MONTHS_PER_YEAR as f64
}

/// Accumulated value of `months` deposits of `payment` at `monthly_rate`
///
/// FV = P * ((1 + r)^n - 1) / r, falling back to P * n at a zero rate.
pub fn future_value(payment: f64, monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return payment * months as f64;
    }
    payment * ((1.0 + monthly_rate).powf(months as f64) - 1.0) / monthly_rate
}
