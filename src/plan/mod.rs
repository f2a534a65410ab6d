//! Investment plan data, default catalog and loading

mod data;
mod catalog;
pub mod loader;

pub use data::{RiskTier, RiskProfile, ReturnRange, InstrumentOption, InvestmentPlan};
pub use catalog::{default_catalog, DEFAULT_PREDICTED_SURPLUS, PROFILE_SLOPE_THRESHOLD};
pub use loader::{load_plan, load_plan_from_reader, plan_from_value, load_catalog, load_catalog_from_reader};
