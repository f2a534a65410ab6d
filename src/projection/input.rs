//! Projection inputs and outputs

use crate::plan::{InstrumentOption, RiskTier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Allocation weight per risk tier
///
/// Weights are used exactly as given; nothing here forces them to sum to 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation(BTreeMap<RiskTier, f64>);

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, tier: RiskTier, weight: f64) -> Self {
        self.set(tier, weight);
        self
    }

    pub fn set(&mut self, tier: RiskTier, weight: f64) {
        self.0.insert(tier, weight);
    }

    /// Weight for a tier, zero when absent
    pub fn weight(&self, tier: RiskTier) -> f64 {
        self.0.get(&tier).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RiskTier, f64)> + '_ {
        self.0.iter().map(|(tier, weight)| (*tier, *weight))
    }

    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(RiskTier, f64)> for Allocation {
    fn from_iter<I: IntoIterator<Item = (RiskTier, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Chosen instrument per risk tier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeMap<RiskTier, InstrumentOption>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, tier: RiskTier, option: InstrumentOption) -> Self {
        self.set(tier, option);
        self
    }

    /// Replace the choice for a tier
    pub fn set(&mut self, tier: RiskTier, option: InstrumentOption) {
        self.0.insert(tier, option);
    }

    pub fn remove(&mut self, tier: RiskTier) -> Option<InstrumentOption> {
        self.0.remove(&tier)
    }

    pub fn get(&self, tier: RiskTier) -> Option<&InstrumentOption> {
        self.0.get(&tier)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RiskTier, &InstrumentOption)> + '_ {
        self.0.iter().map(|(tier, option)| (*tier, option))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(RiskTier, InstrumentOption)> for Selection {
    fn from_iter<I: IntoIterator<Item = (RiskTier, InstrumentOption)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything a single projection needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Amount deposited at the end of every month
    pub monthly_investment: f64,

    /// Horizon in whole years
    pub projection_years: u32,

    pub allocations: Allocation,

    pub selections: Selection,
}

/// Projected portfolio value range
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub total_invested: f64,
    pub projected_min: f64,
    pub projected_max: f64,
}

impl ProjectionResult {
    /// Result for the degenerate nothing-invested case
    pub const ZERO: ProjectionResult = ProjectionResult {
        total_invested: 0.0,
        projected_min: 0.0,
        projected_max: 0.0,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Growth over contributions at the low end
    pub fn gain_min(&self) -> f64 {
        self.projected_min - self.total_invested
    }

    /// Growth over contributions at the high end
    pub fn gain_max(&self) -> f64 {
        self.projected_max - self.total_invested
    }
}
