//! Investment Planner - projection engine for MoneyMate savings plans
//!
//! This library provides:
//! - Blended-rate annuity projections of a monthly investment over a horizon
//! - Month-by-month growth schedules for the low and high ends of the range
//! - Investment plan model, default instrument catalog and plan loading
//! - Scenario sweeps over allocation percentages and horizons
//! - Rupee formatting for display

pub mod error;
pub mod config;
pub mod plan;
pub mod projection;
pub mod scenario;
pub mod format;

// Re-export commonly used types
pub use error::{PlannerError, Result};
pub use config::PlannerConfig;
pub use plan::{InvestmentPlan, InstrumentOption, RiskTier, RiskProfile};
pub use projection::{project, ProjectionInput, ProjectionResult, Allocation, Selection, GrowthSchedule};
pub use scenario::{ScenarioRunner, ScenarioOutcome, HORIZON_PRESETS};
