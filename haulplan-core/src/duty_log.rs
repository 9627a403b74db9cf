//! Daily duty-status logs produced by the trip-planning service.
//!
//! Logs are consumed as received. Totals are not cross-checked against the
//! entries and a day is not required to sum to 24 hours.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Duty status recorded on a driver's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Activity {
    /// Behind the wheel.
    Driving,
    /// Working but not driving: fuelling, loading, inspections.
    OnDuty,
    /// Resting in the sleeper berth.
    SleeperBerth,
    /// Relieved of all duty.
    OffDuty,
}

impl Activity {
    /// Every duty status in log-grid order.
    pub const ALL: [Self; 4] = [Self::OffDuty, Self::SleeperBerth, Self::Driving, Self::OnDuty];

    /// Label shown on log cards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Driving => "Driving",
            Self::OnDuty => "On Duty",
            Self::SleeperBerth => "Sleeper Berth",
            Self::OffDuty => "Off Duty",
        }
    }

    /// Whether the status counts against the 70-hour cycle.
    #[must_use]
    pub const fn counts_toward_cycle(self) -> bool {
        matches!(self, Self::Driving | Self::OnDuty)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One contiguous block of a single duty status.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActivityEntry {
    /// Duty status for the block.
    pub activity: Activity,
    /// Length of the block in hours.
    pub duration_hours: f64,
    /// Display colour supplied by the service.
    pub color_tag: String,
}

/// A single day's log with the service-computed totals.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayLog {
    /// One-based day number within the trip.
    pub day: u32,
    /// Entries in chronological order.
    pub entries: Vec<ActivityEntry>,
    /// Hours spent driving.
    pub total_driving: f64,
    /// Hours on duty, not driving.
    pub total_on_duty: f64,
    /// Hours in the sleeper berth.
    pub total_sleeper: f64,
    /// Hours off duty.
    pub total_off_duty: f64,
}

impl DayLog {
    /// Total for a single duty status.
    #[must_use]
    pub const fn total_for(&self, activity: Activity) -> f64 {
        match activity {
            Activity::Driving => self.total_driving,
            Activity::OnDuty => self.total_on_duty,
            Activity::SleeperBerth => self.total_sleeper,
            Activity::OffDuty => self.total_off_duty,
        }
    }
}
