//! Investment projection: annuity math, projector and growth schedule

mod annuity;
mod engine;
mod input;
mod schedule;

pub use annuity::{future_value, monthly_rate, MONTHS_PER_YEAR};
pub use engine::{project, BlendedRates};
pub use input::{Allocation, Selection, ProjectionInput, ProjectionResult};
pub use schedule::{GrowthSchedule, ScheduleRow};
