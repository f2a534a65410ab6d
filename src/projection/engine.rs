//! Investment projector: blended-rate annuity projection over a horizon

use super::annuity::{future_value, monthly_rate, MONTHS_PER_YEAR};
use super::input::{ProjectionInput, ProjectionResult};
use crate::error::{PlannerError, Result};
use log::{debug, warn};

/// Weights further than this from 1.0 get a warning (they are still used as given)
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weighted annual return (percent) at the low and high end of each range
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlendedRates {
    pub min_annual: f64,
    pub max_annual: f64,

    /// Number of tiers that had both a positive weight and a selection
    pub contributing_tiers: usize,
}

impl BlendedRates {
    /// Blend the selected ranges by allocation weight
    ///
    /// A tier contributes only if its weight is positive and an option is
    /// selected for it. Missing selections add nothing (a 0% share).
    pub fn from_input(input: &ProjectionInput) -> Self {
        let mut rates = BlendedRates::default();

        for (tier, weight) in input.allocations.iter() {
            if weight <= 0.0 {
                continue;
            }
            let Some(option) = input.selections.get(tier) else {
                debug!("No selection for {} (weight {}), contributes 0%", tier, weight);
                continue;
            };
            rates.min_annual += weight * option.return_range.min;
            rates.max_annual += weight * option.return_range.max;
            rates.contributing_tiers += 1;
        }

        rates
    }

    pub fn monthly_min(&self) -> f64 {
        monthly_rate(self.min_annual)
    }

    pub fn monthly_max(&self) -> f64 {
        monthly_rate(self.max_annual)
    }
}

impl ProjectionInput {
    /// Number of monthly deposits over the horizon
    ///
    /// Fails with `InvalidHorizon` for zero years or a month count past `u32::MAX`.
    pub fn months(&self) -> Result<u32> {
        match self.projection_years.checked_mul(MONTHS_PER_YEAR) {
            Some(months) if months > 0 => Ok(months),
            _ => Err(PlannerError::InvalidHorizon {
                years: self.projection_years,
            }),
        }
    }

    /// Reject inputs the projector must not silently correct
    pub fn validate(&self) -> Result<()> {
        PlannerError::check_non_negative("monthly_investment", self.monthly_investment)?;

        self.months()?;

        for (_, weight) in self.allocations.iter() {
            PlannerError::check_finite("allocation weight", weight)?;
        }

        for (_, option) in self.selections.iter() {
            option.validate()?;
        }

        Ok(())
    }

    /// True when the projection is defined to be all zeros
    fn is_degenerate(&self, rates: &BlendedRates) -> bool {
        self.monthly_investment == 0.0 || self.selections.is_empty() || rates.contributing_tiers == 0
    }
}

/// Project the portfolio value range for the given input
///
/// Pure and deterministic: identical inputs always give identical outputs.
pub fn project(input: &ProjectionInput) -> Result<ProjectionResult> {
    input.validate()?;

    let rates = BlendedRates::from_input(input);
    if input.is_degenerate(&rates) {
        return Ok(ProjectionResult::ZERO);
    }

    let total_weight = input.allocations.total();
    if (total_weight - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        warn!("Allocation weights sum to {}, projecting without renormalising", total_weight);
    }

    let months = input.months()?;
    let payment = input.monthly_investment;

    let result = ProjectionResult {
        total_invested: payment * months as f64,
        projected_min: future_value(payment, rates.monthly_min(), months),
        projected_max: future_value(payment, rates.monthly_max(), months),
    };

    debug!(
        "Projected {} months at {:.4}%-{:.4}% p.a.: {:.2} -> {:.2}..{:.2}",
        months, rates.min_annual, rates.max_annual,
        result.total_invested, result.projected_min, result.projected_max
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{InstrumentOption, RiskTier};
    use crate::projection::{Allocation, Selection};
    use approx::assert_relative_eq;

    fn single_tier(monthly_investment: f64, years: u32, min: f64, max: f64) -> ProjectionInput {
        ProjectionInput {
            monthly_investment,
            projection_years: years,
            allocations: Allocation::new().with(RiskTier::Medium, 1.0),
            selections: Selection::new()
                .with(RiskTier::Medium, InstrumentOption::new("Fund", min, max, "")),
        }
    }

    fn two_tier(min_low: f64, max_low: f64, min_high: f64, max_high: f64) -> ProjectionInput {
        ProjectionInput {
            monthly_investment: 100.0,
            projection_years: 1,
            allocations: Allocation::new()
                .with(RiskTier::Low, 0.5)
                .with(RiskTier::High, 0.5),
            selections: Selection::new()
                .with(RiskTier::Low, InstrumentOption::new("Deposit", min_low, max_low, ""))
                .with(RiskTier::High, InstrumentOption::new("Equity", min_high, max_high, "")),
        }
    }

    #[test]
    fn test_zero_investment_gives_zero_result() {
        let input = single_tier(0.0, 5, 6.0, 8.0);
        assert_eq!(project(&input).unwrap(), ProjectionResult::ZERO);
    }

    #[test]
    fn test_empty_selection_gives_zero_result() {
        let mut input = single_tier(500.0, 5, 6.0, 8.0);
        input.selections = Selection::new();
        assert_eq!(project(&input).unwrap(), ProjectionResult::ZERO);
    }

    #[test]
    fn test_no_matching_tier_gives_zero_result() {
        let mut input = single_tier(500.0, 5, 6.0, 8.0);
        input.allocations = Allocation::new()
            .with(RiskTier::Low, 1.0)
            .with(RiskTier::Medium, 0.0);
        assert_eq!(project(&input).unwrap(), ProjectionResult::ZERO);
    }

    #[test]
    fn test_single_tier_zero_rate() {
        let result = project(&single_tier(1000.0, 1, 0.0, 0.0)).unwrap();
        assert_eq!(result.total_invested, 12_000.0);
        assert_eq!(result.projected_min, 12_000.0);
        assert_eq!(result.projected_max, 12_000.0);
    }

    #[test]
    fn test_single_tier_one_percent_monthly() {
        let result = project(&single_tier(100.0, 1, 12.0, 12.0)).unwrap();
        assert_eq!(result.total_invested, 1200.0);
        assert_relative_eq!(result.projected_min, 1268.25, epsilon = 0.01);
        assert_relative_eq!(result.projected_max, result.projected_min);
    }

    #[test]
    fn test_blending_matches_equivalent_single_rate() {
        let blended = project(&two_tier(6.0, 6.0, 18.0, 18.0)).unwrap();
        let single = project(&single_tier(100.0, 1, 12.0, 12.0)).unwrap();
        assert_relative_eq!(blended.projected_min, single.projected_min, max_relative = 1e-12);
        assert_relative_eq!(blended.projected_max, single.projected_max, max_relative = 1e-12);
        assert_eq!(blended.total_invested, single.total_invested);
    }

    #[test]
    fn test_longer_horizon_grows_max() {
        let mut previous = 0.0;
        for years in 1..=15 {
            let result = project(&single_tier(2500.0, years, 0.0, 9.0)).unwrap();
            assert!(result.projected_max > previous, "year {} did not grow", years);
            previous = result.projected_max;
        }
    }

    #[test]
    fn test_missing_selection_contributes_zero_share() {
        let input = ProjectionInput {
            monthly_investment: 1000.0,
            projection_years: 3,
            allocations: Allocation::new()
                .with(RiskTier::Low, 0.7)
                .with(RiskTier::High, 0.3),
            selections: Selection::new()
                .with(RiskTier::Low, InstrumentOption::new("FD", 6.5, 7.5, "")),
        };

        let result = project(&input).unwrap();

        let months = 36;
        let expected_min = future_value(1000.0, 0.7 * 6.5 / 100.0 / 12.0, months);
        let expected_max = future_value(1000.0, 0.7 * 7.5 / 100.0 / 12.0, months);
        assert_relative_eq!(result.projected_min, expected_min, max_relative = 1e-12);
        assert_relative_eq!(result.projected_max, expected_max, max_relative = 1e-12);
        assert_eq!(result.total_invested, 36_000.0);
    }

    #[test]
    fn test_ordering_invariant_for_non_negative_rates() {
        let ranges = [(0.0, 0.0), (0.0, 5.0), (6.5, 7.5), (12.0, 18.0), (15.0, 25.0)];
        for &(lo_min, lo_max) in &ranges {
            for &(hi_min, hi_max) in &ranges {
                for years in [1, 5, 10, 15] {
                    let mut input = two_tier(lo_min, lo_max, hi_min, hi_max);
                    input.projection_years = years;
                    let r = project(&input).unwrap();
                    let tol = 1e-6 * r.projected_max.abs().max(1.0);
                    assert!(r.projected_min <= r.projected_max + tol);
                    assert!(r.total_invested <= r.projected_min + tol);
                }
            }
        }
    }

    #[test]
    fn test_weights_not_renormalised() {
        let mut input = single_tier(100.0, 1, 24.0, 24.0);
        input.allocations = Allocation::new().with(RiskTier::Medium, 0.5);
        let halved = project(&input).unwrap();
        let reference = project(&single_tier(100.0, 1, 12.0, 12.0)).unwrap();
        assert_relative_eq!(halved.projected_max, reference.projected_max, max_relative = 1e-12);
    }

    #[test]
    fn test_negative_rate_falls_below_invested() {
        let result = project(&single_tier(100.0, 2, -8.0, -2.0)).unwrap();
        assert!(result.projected_min < result.projected_max);
        assert!(result.projected_max < result.total_invested);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(matches!(
            project(&single_tier(-1.0, 5, 6.0, 8.0)),
            Err(PlannerError::NegativeValue { field: "monthly_investment", .. })
        ));
        assert!(matches!(
            project(&single_tier(100.0, 0, 6.0, 8.0)),
            Err(PlannerError::InvalidHorizon { years: 0 })
        ));
        assert!(matches!(
            project(&single_tier(100.0, 5, 9.0, 8.0)),
            Err(PlannerError::InvalidReturnRange { .. })
        ));
        assert!(matches!(
            project(&single_tier(f64::NAN, 5, 6.0, 8.0)),
            Err(PlannerError::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn test_horizon_too_long_to_count_in_months() {
        // 400M years * 12 does not fit in u32
        let input = single_tier(100.0, 400_000_000, 0.0, 0.0);
        assert!(matches!(input.months(), Err(PlannerError::InvalidHorizon { years: 400_000_000 })));
        assert!(matches!(
            project(&input),
            Err(PlannerError::InvalidHorizon { years: 400_000_000 })
        ));

        // Largest horizon that still fits is projected in full
        let longest = u32::MAX / MONTHS_PER_YEAR;
        let result = project(&single_tier(1.0, longest, 0.0, 0.0)).unwrap();
        assert_eq!(result.total_invested, (longest * MONTHS_PER_YEAR) as f64);
    }

    #[test]
    fn test_zero_investment_still_validates_ranges() {
        assert!(project(&single_tier(0.0, 5, 9.0, 8.0)).is_err());
    }

    #[test]
    fn test_blended_rates() {
        let rates = BlendedRates::from_input(&two_tier(6.0, 8.0, 16.0, 24.0));
        assert_relative_eq!(rates.min_annual, 11.0);
        assert_relative_eq!(rates.max_annual, 16.0);
        assert_eq!(rates.contributing_tiers, 2);
    }
}
