//! Error types for plan loading and projection

use crate::plan::RiskTier;
use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Errors raised by the planner
#[derive(Debug, Error)]
pub enum PlannerError {
    /// A numeric input that must be non-negative was negative
    #[error("field '{field}' must be non-negative, got {value}")]
    NegativeValue { field: &'static str, value: f64 },

    /// NaN or infinite input
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },

    /// Horizon of zero years, or too many years to count in months
    #[error("projection horizon must be between one year and {max} years, got {years}", max = u32::MAX / 12)]
    InvalidHorizon { years: u32 },

    /// Return range with min above max
    #[error("instrument '{name}' has an invalid return range: {min}% > {max}%")]
    InvalidReturnRange { name: String, min: f64, max: f64 },

    /// Allocation percentage outside 0..=100
    #[error("investment percentage must be within 0-100, got {value}")]
    InvalidPercentage { value: f64 },

    /// Predicted surplus must be positive for a plan to exist
    #[error("predicted surplus must be positive, got {value}")]
    NonPositiveSurplus { value: f64 },

    /// Selection references an instrument the plan does not offer
    #[error("no instrument named '{name}' in tier {tier}")]
    UnknownInstrument { tier: RiskTier, name: String },

    /// Label that is not a known tier or profile
    #[error("unknown {kind} label '{label}'")]
    UnknownLabel { kind: &'static str, label: String },

    /// Schedule date past what the calendar can represent
    #[error("date {months} months after {start} is out of range")]
    DateOutOfRange { start: NaiveDate, months: u32 },

    /// Error payload returned by the analytics service instead of a plan
    #[error("analytics service error: {0}")]
    ServiceError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PlannerError {
    /// Fail with `NonFiniteValue` when `value` is NaN or infinite
    pub(crate) fn check_finite(field: &'static str, value: f64) -> Result<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFiniteValue { field })
        }
    }

    /// Fail with `NegativeValue` (or `NonFiniteValue`) unless `value >= 0`
    pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<f64> {
        let value = Self::check_finite(field, value)?;
        if value < 0.0 {
            Err(Self::NegativeValue { field, value })
        } else {
            Ok(value)
        }
    }
}
