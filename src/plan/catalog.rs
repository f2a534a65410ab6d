//! Built-in instrument catalog and per-profile allocation tables
//!
//! These are the same defaults the analytics service ships with, so plans can
//! be assembled offline when only a surplus and a profile are known.

use super::{InstrumentOption, InvestmentPlan, RiskProfile, RiskTier};
use crate::projection::Allocation;
use std::collections::BTreeMap;

/// Surplus used when no savings prediction is available
pub const DEFAULT_PREDICTED_SURPLUS: f64 = 50_000.0;

/// Spending-trend slope beyond which the profile leaves Moderate
pub const PROFILE_SLOPE_THRESHOLD: f64 = 5.0;

/// Default instruments on offer, two per tier
pub fn default_catalog() -> BTreeMap<RiskTier, Vec<InstrumentOption>> {
    let mut catalog = BTreeMap::new();

    catalog.insert(
        RiskTier::Low,
        vec![
            InstrumentOption::new(
                "Fixed Deposit (FD)",
                6.5,
                7.5,
                "A safe option offered by banks with guaranteed returns. Good for capital preservation.",
            ),
            InstrumentOption::new(
                "Public Provident Fund (PPF)",
                7.0,
                7.5,
                "A long-term, government-backed savings scheme with tax benefits. Ideal for retirement planning.",
            ),
        ],
    );

    catalog.insert(
        RiskTier::Medium,
        vec![
            InstrumentOption::new(
                "Mutual Funds (SIP)",
                12.0,
                18.0,
                "Invest in a diversified portfolio of stocks or bonds managed by experts. SIPs allow for regular, disciplined investing.",
            ),
            InstrumentOption::new(
                "Real Estate",
                8.0,
                14.0,
                "Investing in property can provide rental income and long-term appreciation, but requires significant capital.",
            ),
        ],
    );

    catalog.insert(
        RiskTier::High,
        vec![
            InstrumentOption::new(
                "Direct Equity (Stocks)",
                15.0,
                25.0,
                "Buying shares of individual companies. Offers high growth potential but comes with higher volatility and risk.",
            ),
            InstrumentOption::new(
                "Gold",
                8.0,
                12.0,
                "A traditional safe-haven asset. Can be held physically or through Gold ETFs and Bonds to hedge against inflation.",
            ),
        ],
    );

    catalog
}

impl RiskProfile {
    /// Portfolio weights (Low/Medium/High) for this profile
    pub fn allocation(&self) -> Allocation {
        let (low, medium, high) = match self {
            RiskProfile::Conservative => (0.7, 0.2, 0.1),
            RiskProfile::Moderate => (0.4, 0.4, 0.2),
            RiskProfile::Aggressive => (0.2, 0.4, 0.4),
        };
        Allocation::new()
            .with(RiskTier::Low, low)
            .with(RiskTier::Medium, medium)
            .with(RiskTier::High, high)
    }

    /// Infer a profile from the slope of the user's monthly spending trend
    pub fn from_spending_slope(slope: f64) -> Self {
        if slope > PROFILE_SLOPE_THRESHOLD {
            RiskProfile::Aggressive
        } else if slope < -PROFILE_SLOPE_THRESHOLD {
            RiskProfile::Conservative
        } else {
            RiskProfile::Moderate
        }
    }
}

impl InvestmentPlan {
    /// Assemble a plan from the default catalog for a surplus and profile
    pub fn from_profile(predicted_surplus: f64, risk_profile: RiskProfile) -> Self {
        Self {
            predicted_surplus,
            risk_profile,
            justification: format!(
                "Based on your habits, we've identified your risk profile as '{}'.",
                risk_profile
            ),
            allocation_percentages: risk_profile.allocation(),
            investment_options: default_catalog(),
        }
    }
}

impl Default for InvestmentPlan {
    fn default() -> Self {
        Self::from_profile(DEFAULT_PREDICTED_SURPLUS, RiskProfile::Moderate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_allocations_sum_to_one() {
        for profile in [RiskProfile::Conservative, RiskProfile::Moderate, RiskProfile::Aggressive] {
            assert_relative_eq!(profile.allocation().total(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_profile_from_slope() {
        assert_eq!(RiskProfile::from_spending_slope(7.2), RiskProfile::Aggressive);
        assert_eq!(RiskProfile::from_spending_slope(-6.0), RiskProfile::Conservative);
        assert_eq!(RiskProfile::from_spending_slope(5.0), RiskProfile::Moderate);
        assert_eq!(RiskProfile::from_spending_slope(0.0), RiskProfile::Moderate);
    }

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 3);
        for options in catalog.values() {
            assert_eq!(options.len(), 2);
            for option in options {
                assert!(option.validate().is_ok(), "{} invalid", option.name);
            }
        }
    }

    #[test]
    fn test_default_plan() {
        let plan = InvestmentPlan::default();
        assert!(plan.validate().is_ok());
        assert_eq!(plan.risk_profile, RiskProfile::Moderate);
        assert_eq!(plan.predicted_surplus, DEFAULT_PREDICTED_SURPLUS);
        assert!(plan.justification.contains("'Moderate'"));
        assert_eq!(plan.allocation_percentages.weight(RiskTier::High), 0.2);
    }
}
