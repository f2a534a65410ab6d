//! Run configuration with environment overrides
//!
//! Recognised variables: PLAN_PATH, PREDICTED_SURPLUS, RISK_PROFILE,
//! INVESTMENT_PCT, PROJECTION_YEARS, SCHEDULE_START (YYYY-MM-DD).

use crate::error::Result;
use crate::plan::{load_plan, InvestmentPlan, RiskProfile, DEFAULT_PREDICTED_SURPLUS};
use chrono::NaiveDate;
use log::warn;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Default slider position (percent of surplus invested)
pub const DEFAULT_INVESTMENT_PCT: f64 = 50.0;

/// Default horizon in years
pub const DEFAULT_PROJECTION_YEARS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Plan JSON from the analytics service; built from the default catalog if None
    pub plan_path: Option<PathBuf>,
    pub predicted_surplus: f64,
    pub risk_profile: RiskProfile,
    pub investment_pct: f64,
    pub projection_years: u32,
    /// First schedule month is the month after this date (today if None)
    pub schedule_start: Option<NaiveDate>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            plan_path: None,
            predicted_surplus: DEFAULT_PREDICTED_SURPLUS,
            risk_profile: RiskProfile::Moderate,
            investment_pct: DEFAULT_INVESTMENT_PCT,
            projection_years: DEFAULT_PROJECTION_YEARS,
            schedule_start: None,
        }
    }
}

impl PlannerConfig {
    /// Defaults overridden by process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            plan_path: lookup("PLAN_PATH").map(PathBuf::from),
            predicted_surplus: parse_or(&lookup, "PREDICTED_SURPLUS", defaults.predicted_surplus),
            risk_profile: parse_or(&lookup, "RISK_PROFILE", defaults.risk_profile),
            investment_pct: parse_or(&lookup, "INVESTMENT_PCT", defaults.investment_pct),
            projection_years: parse_or(&lookup, "PROJECTION_YEARS", defaults.projection_years),
            schedule_start: lookup("SCHEDULE_START").and_then(|s| match s.parse() {
                Ok(date) => Some(date),
                Err(_) => {
                    warn!("Ignoring SCHEDULE_START={:?}: expected YYYY-MM-DD", s);
                    None
                }
            }),
        }
    }

    /// Load the configured plan, or assemble one from surplus and profile
    pub fn load_plan(&self) -> Result<InvestmentPlan> {
        let plan = match &self.plan_path {
            Some(path) => load_plan(path)?,
            None => InvestmentPlan::from_profile(self.predicted_surplus, self.risk_profile),
        };
        plan.validate()?;
        Ok(plan)
    }

    /// Schedule start date, falling back to today
    pub fn schedule_start_or_today(&self) -> NaiveDate {
        self.schedule_start
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {}={:?}: not a valid value", key, raw);
            default
        }),
        None => default,
    }
}
