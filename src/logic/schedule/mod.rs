pub mod adjustments;
pub mod engine;

pub use engine::{generate_schedule, IrrigationScheduler, ScheduleRequest, PLAN_DAYS};

use crate::models::{DayOutlook, Weekday};

/// Inputs visible to an adjustment while one day is being planned
pub struct DayContext<'a> {
    pub index: usize,
    pub day: Weekday,
    pub outlook: DayOutlook,
    pub crops: &'a [String],
    pub area_hectares: f64,
}

/// Unrounded working values for one day
#[derive(Debug, Clone, PartialEq)]
pub struct DraftEntry {
    pub duration_minutes: f64,
    pub volume_liters: f64,
    pub rationale: String,
}

/// A step in the per-day irrigation calculation.
///
/// Steps run in the order the scheduler holds them; multiplications do not
/// commute under rounding, so that order is part of the output contract.
pub trait Adjustment: Send + Sync {
    /// Unique identifier for this adjustment
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn apply(&self, day: &DayContext<'_>, draft: &mut DraftEntry);
}
