//! Month-by-month growth schedule for a projection

use super::engine::BlendedRates;
use super::input::{ProjectionInput, ProjectionResult};
use super::annuity::MONTHS_PER_YEAR;
use crate::error::{PlannerError, Result};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Rows reserved up front; longer schedules grow as they go
const MAX_PREALLOCATED_ROWS: u32 = 12 * 1200;

/// Balances at the end of one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub date: NaiveDate,
    pub contributed: f64,
    pub balance_min: f64,
    pub balance_max: f64,
}

/// Growth of the portfolio at the low and high blended rates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthSchedule {
    pub start_date: NaiveDate,
    pub rows: Vec<ScheduleRow>,
}

impl GrowthSchedule {
    /// Roll balances forward one month at a time from `start_date`
    ///
    /// Each month the balance earns the monthly rate, then the deposit is
    /// added, so the last row agrees with `project()`. Inputs that project
    /// to zero yield rows of zeros.
    pub fn build(input: &ProjectionInput, start_date: NaiveDate) -> Result<Self> {
        input.validate()?;

        let rates = BlendedRates::from_input(input);
        let active = input.monthly_investment > 0.0
            && !input.selections.is_empty()
            && rates.contributing_tiers > 0;
        let (payment, r_min, r_max) = if active {
            (input.monthly_investment, rates.monthly_min(), rates.monthly_max())
        } else {
            (0.0, 0.0, 0.0)
        };

        let months = input.months()?;
        start_date
            .checked_add_months(Months::new(months))
            .ok_or(PlannerError::DateOutOfRange { start: start_date, months })?;

        let mut rows = Vec::with_capacity(months.min(MAX_PREALLOCATED_ROWS) as usize);
        let mut balance_min = 0.0;
        let mut balance_max = 0.0;

        for month in 1..=months {
            balance_min = balance_min * (1.0 + r_min) + payment;
            balance_max = balance_max * (1.0 + r_max) + payment;

            let date = start_date
                .checked_add_months(Months::new(month))
                .ok_or(PlannerError::DateOutOfRange { start: start_date, months: month })?;

            rows.push(ScheduleRow {
                month,
                date,
                contributed: payment * month as f64,
                balance_min,
                balance_max,
            });
        }

        Ok(Self { start_date, rows })
    }

    /// Rows at each full year
    pub fn yearly(&self) -> Vec<ScheduleRow> {
        self.rows
            .iter()
            .filter(|row| row.month % MONTHS_PER_YEAR == 0)
            .copied()
            .collect()
    }

    /// Final balances as a projection result
    pub fn summary(&self) -> ProjectionResult {
        self.rows
            .last()
            .map(|row| ProjectionResult {
                total_invested: row.contributed,
                projected_min: row.balance_min,
                projected_max: row.balance_max,
            })
            .unwrap_or(ProjectionResult::ZERO)
    }

    /// Write all rows as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
