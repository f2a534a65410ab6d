//! Plan data structures matching the analytics service investment-plan payload

use crate::error::{PlannerError, Result};
use crate::projection::{Allocation, ProjectionInput, Selection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Risk tier an instrument belongs to
///
/// Ordering is low to high risk, which is also the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(rename = "Low Risk", alias = "Conservative")]
    Low,
    #[serde(rename = "Medium Risk", alias = "Moderate")]
    Medium,
    #[serde(rename = "High Risk", alias = "Aggressive")]
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::Low, RiskTier::Medium, RiskTier::High];

    /// Label used by the analytics service
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low risk" | "low" | "conservative" => Ok(RiskTier::Low),
            "medium risk" | "medium" | "moderate" => Ok(RiskTier::Medium),
            "high risk" | "high" | "aggressive" => Ok(RiskTier::High),
            _ => Err(PlannerError::UnknownLabel {
                kind: "risk tier",
                label: s.to_string(),
            }),
        }
    }
}

/// Investor profile inferred from spending habits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskProfile::Conservative => "Conservative",
            RiskProfile::Moderate => "Moderate",
            RiskProfile::Aggressive => "Aggressive",
        };
        f.write_str(label)
    }
}

impl FromStr for RiskProfile {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(RiskProfile::Conservative),
            "moderate" => Ok(RiskProfile::Moderate),
            "aggressive" => Ok(RiskProfile::Aggressive),
            _ => Err(PlannerError::UnknownLabel {
                kind: "risk profile",
                label: s.to_string(),
            }),
        }
    }
}

/// Annual return range in percent, serialized as a `[min, max]` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct ReturnRange {
    pub min: f64,
    pub max: f64,
}

impl ReturnRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Same return at both ends
    pub fn fixed(rate: f64) -> Self {
        Self { min: rate, max: rate }
    }
}

impl From<(f64, f64)> for ReturnRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<ReturnRange> for (f64, f64) {
    fn from(range: ReturnRange) -> Self {
        (range.min, range.max)
    }
}

/// One selectable investment product within a risk tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentOption {
    pub name: String,

    /// Annual return range (percent)
    #[serde(rename = "return_pa")]
    pub return_range: ReturnRange,

    #[serde(default)]
    pub description: String,
}

impl InstrumentOption {
    pub fn new(name: impl Into<String>, min: f64, max: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_range: ReturnRange::new(min, max),
            description: description.into(),
        }
    }

    /// Check that both bounds are finite and ordered
    pub fn validate(&self) -> Result<()> {
        let min = PlannerError::check_finite("return_pa.min", self.return_range.min)?;
        let max = PlannerError::check_finite("return_pa.max", self.return_range.max)?;
        if min > max {
            return Err(PlannerError::InvalidReturnRange {
                name: self.name.clone(),
                min,
                max,
            });
        }
        Ok(())
    }
}

/// Personalized plan produced by the analytics service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPlan {
    /// Predicted monthly surplus available for investing
    pub predicted_surplus: f64,

    pub risk_profile: RiskProfile,

    #[serde(default)]
    pub justification: String,

    /// Allocation weights per tier for this profile
    pub allocation_percentages: Allocation,

    /// All instruments on offer, per tier, in display order
    pub investment_options: BTreeMap<RiskTier, Vec<InstrumentOption>>,
}

impl InvestmentPlan {
    /// Check the plan is usable: positive surplus, well-formed instruments
    pub fn validate(&self) -> Result<()> {
        let surplus = PlannerError::check_finite("predicted_surplus", self.predicted_surplus)?;
        if surplus <= 0.0 {
            return Err(PlannerError::NonPositiveSurplus { value: surplus });
        }
        for option in self.investment_options.values().flatten() {
            option.validate()?;
        }
        Ok(())
    }

    /// Amount invested per month for a slider position of `pct` percent
    pub fn monthly_investment(&self, pct: f64) -> Result<f64> {
        let pct = PlannerError::check_finite("investment_pct", pct)?;
        if !(0.0..=100.0).contains(&pct) {
            return Err(PlannerError::InvalidPercentage { value: pct });
        }
        Ok(self.predicted_surplus * (pct / 100.0))
    }

    /// Tiers with a positive allocation, low to high risk
    pub fn offered_tiers(&self) -> Vec<RiskTier> {
        RiskTier::ALL
            .into_iter()
            .filter(|tier| self.allocation_percentages.weight(*tier) > 0.0)
            .collect()
    }

    /// Options listed for a tier (empty if none)
    pub fn options(&self, tier: RiskTier) -> &[InstrumentOption] {
        self.investment_options
            .get(&tier)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Initial selection: the first listed option of every tier that has any
    pub fn default_selection(&self) -> Selection {
        self.investment_options
            .iter()
            .filter_map(|(tier, options)| options.first().map(|option| (*tier, option.clone())))
            .collect()
    }

    /// Choose the option named `name` for `tier`
    pub fn select(&self, selection: &mut Selection, tier: RiskTier, name: &str) -> Result<()> {
        let option = self
            .options(tier)
            .iter()
            .find(|option| option.name == name)
            .ok_or_else(|| PlannerError::UnknownInstrument {
                tier,
                name: name.to_string(),
            })?;
        selection.set(tier, option.clone());
        Ok(())
    }

    /// Build projector input from the user's choices
    pub fn projection_input(
        &self,
        pct: f64,
        projection_years: u32,
        selection: Selection,
    ) -> Result<ProjectionInput> {
        Ok(ProjectionInput {
            monthly_investment: self.monthly_investment(pct)?,
            projection_years,
            allocations: self.allocation_percentages.clone(),
            selections: selection,
        })
    }
}
