//! Scenario runner for sweeping allocation percentages and horizons
//!
//! Holds one plan and evaluates many user choices against it.

use crate::error::Result;
use crate::plan::InvestmentPlan;
use crate::projection::{project, ProjectionResult, Selection};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Horizons offered by the planner, in years
pub const HORIZON_PRESETS: [u32; 4] = [1, 5, 10, 15];

/// Projection for one (percentage, horizon) choice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub investment_pct: f64,
    pub projection_years: u32,
    pub monthly_investment: f64,
    pub result: ProjectionResult,
}

/// Pre-loaded plan for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(InvestmentPlan::default());
/// let selection = runner.plan().default_selection();
/// for outcome in runner.run_horizons(50.0, &selection)? {
///     println!("{} years: {:.0}", outcome.projection_years, outcome.result.projected_max);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    plan: InvestmentPlan,
}

impl ScenarioRunner {
    pub fn new(plan: InvestmentPlan) -> Self {
        Self { plan }
    }

    /// Run a single projection
    pub fn run(&self, investment_pct: f64, projection_years: u32, selection: &Selection) -> Result<ScenarioOutcome> {
        let input = self
            .plan
            .projection_input(investment_pct, projection_years, selection.clone())?;
        let result = project(&input)?;

        Ok(ScenarioOutcome {
            investment_pct,
            projection_years,
            monthly_investment: input.monthly_investment,
            result,
        })
    }

    /// Run every horizon preset for one percentage
    pub fn run_horizons(&self, investment_pct: f64, selection: &Selection) -> Result<Vec<ScenarioOutcome>> {
        HORIZON_PRESETS
            .iter()
            .map(|&years| self.run(investment_pct, years, selection))
            .collect()
    }

    /// Run every (percentage, horizon) combination in parallel
    ///
    /// Outcomes are ordered by percentage, then horizon, as given.
    pub fn run_grid(&self, percentages: &[f64], horizons: &[u32], selection: &Selection) -> Result<Vec<ScenarioOutcome>> {
        let combos: Vec<(f64, u32)> = percentages
            .iter()
            .flat_map(|&pct| horizons.iter().map(move |&years| (pct, years)))
            .collect();

        combos
            .par_iter()
            .map(|&(pct, years)| self.run(pct, years, selection))
            .collect()
    }

    pub fn plan(&self) -> &InvestmentPlan {
        &self.plan
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(InvestmentPlan::default())
    }
}
