use super::soil::SoilType;
use super::weather::DayOutlook;
use crate::error::{AdvisorError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Days of the fixed planning horizon, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn all() -> &'static [Weekday; 7] {
        &[
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
            Weekday::Sunday,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Some(Weekday::Monday),
            "tuesday" | "tue" | "tues" => Some(Weekday::Tuesday),
            "wednesday" | "wed" => Some(Weekday::Wednesday),
            "thursday" | "thu" | "thurs" => Some(Weekday::Thursday),
            "friday" | "fri" => Some(Weekday::Friday),
            "saturday" | "sat" => Some(Weekday::Saturday),
            "sunday" | "sun" => Some(Weekday::Sunday),
            _ => None,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanState {
    Scheduled,
    Completed,
    Skipped,
}

impl PlanState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanState::Scheduled => "scheduled",
            PlanState::Completed => "completed",
            PlanState::Skipped => "skipped",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            PlanState::Scheduled => "○",
            PlanState::Completed => "✓",
            PlanState::Skipped => "–",
        }
    }
}

impl std::fmt::Display for PlanState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationPlanEntry {
    pub day: Weekday,
    pub scheduled_time: String,
    pub duration_minutes: u32,
    pub volume_liters: f64,
    pub rationale: String,
    pub state: PlanState,
    pub outlook: DayOutlook,
}

impl IrrigationPlanEntry {
    pub fn is_skipped(&self) -> bool {
        self.state == PlanState::Skipped
    }

    /// Mark the watering as done. Completing twice is a no-op.
    pub fn complete(&mut self) -> Result<()> {
        match self.state {
            PlanState::Scheduled | PlanState::Completed => {
                self.state = PlanState::Completed;
                Ok(())
            }
            PlanState::Skipped => Err(AdvisorError::InvalidTransition {
                from: PlanState::Skipped.as_str(),
                to: PlanState::Completed.as_str(),
            }),
        }
    }

    /// Undo a completion. Reopening a scheduled entry is a no-op.
    pub fn reopen(&mut self) -> Result<()> {
        match self.state {
            PlanState::Scheduled | PlanState::Completed => {
                self.state = PlanState::Scheduled;
                Ok(())
            }
            PlanState::Skipped => Err(AdvisorError::InvalidTransition {
                from: PlanState::Skipped.as_str(),
                to: PlanState::Scheduled.as_str(),
            }),
        }
    }

    pub fn toggle(&mut self) -> Result<PlanState> {
        match self.state {
            PlanState::Scheduled => self.complete()?,
            PlanState::Completed => self.reopen()?,
            PlanState::Skipped => {
                return Err(AdvisorError::InvalidTransition {
                    from: PlanState::Skipped.as_str(),
                    to: PlanState::Completed.as_str(),
                })
            }
        }
        Ok(self.state)
    }
}

/// A generated schedule together with the inputs that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPlan {
    pub generated_at: DateTime<Utc>,
    pub soil_type: SoilType,
    pub crops: Vec<String>,
    pub area_hectares: f64,
    pub entries: Vec<IrrigationPlanEntry>,
}

impl SavedPlan {
    pub fn new(
        soil_type: SoilType,
        crops: Vec<String>,
        area_hectares: f64,
        entries: Vec<IrrigationPlanEntry>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            soil_type,
            crops,
            area_hectares,
            entries,
        }
    }

    pub fn entry(&self, day: Weekday) -> Option<&IrrigationPlanEntry> {
        self.entries.iter().find(|e| e.day == day)
    }

    pub fn entry_mut(&mut self, day: Weekday) -> Result<&mut IrrigationPlanEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.day == day)
            .ok_or_else(|| AdvisorError::NotFound(format!("no plan entry for {}", day)))
    }

    pub fn completed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.state == PlanState::Completed)
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_skipped()).count()
    }

    pub fn total_volume_liters(&self) -> f64 {
        self.entries
            .iter()
            .filter(|e| !e.is_skipped())
            .map(|e| e.volume_liters)
            .sum()
    }
}
