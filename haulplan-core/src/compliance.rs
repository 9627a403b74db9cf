//! Hours-of-Service aggregates derived from a trip's day logs.
//!
//! All functions are pure. They aggregate values supplied by the
//! trip-planning service and never apply duty-cycle rules of their own.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Activity, DayLog};

/// Ceiling of the 70-hour/8-day duty cycle.
pub const CYCLE_LIMIT_HOURS: f64 = 70.0;

/// Assumed average speed for driving-time estimates, in miles per hour.
pub const AVERAGE_SPEED_MPH: f64 = 55.0;

/// Distance shown before any trip has been planned.
pub const PLACEHOLDER_DISTANCE_MILES: f64 = 750.0;

/// Driving time shown before any trip has been planned.
pub const PLACEHOLDER_DRIVING_HOURS: f64 = 13.6;

/// Sum of driving and on-duty hours over every day.
///
/// # Examples
/// ```
/// use haulplan_core::{total_trip_hours, DayLog};
///
/// assert_eq!(total_trip_hours(&[]), 0.0);
///
/// let day = DayLog { day: 1, total_driving: 11.0, total_on_duty: 2.5, ..DayLog::default() };
/// assert_eq!(total_trip_hours(&[day]), 13.5);
/// ```
#[must_use]
pub fn total_trip_hours(logs: &[DayLog]) -> f64 {
    logs.iter().map(cycle_hours).sum()
}

/// Hours of one day that count against the cycle.
fn cycle_hours(day: &DayLog) -> f64 {
    Activity::ALL
        .into_iter()
        .filter(|activity| activity.counts_toward_cycle())
        .map(|activity| day.total_for(activity))
        .sum()
}

/// Hours left in the 70-hour cycle once the trip is driven, floored at zero.
///
/// # Examples
/// ```
/// use haulplan_core::remaining_cycle_hours;
///
/// assert_eq!(remaining_cycle_hours(22.5, 30.0), 17.5);
/// assert_eq!(remaining_cycle_hours(50.0, 30.0), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "remaining hours subtract used hours from the cycle ceiling"
)]
pub fn remaining_cycle_hours(current_cycle_used_hours: f64, total_trip_hours: f64) -> f64 {
    (CYCLE_LIMIT_HOURS - (current_cycle_used_hours + total_trip_hours)).max(0.0)
}

/// Driving time for a distance at [`AVERAGE_SPEED_MPH`].
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "driving time divides distance by the assumed average speed"
)]
pub fn estimated_driving_hours(total_distance_miles: f64) -> f64 {
    total_distance_miles / AVERAGE_SPEED_MPH
}

/// Sum of all four duty-status totals for one day.
///
/// The result is not checked against 24 hours.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "daily totals sum the four duty-status columns"
)]
pub fn daily_total(day: &DayLog) -> f64 {
    day.total_driving + day.total_on_duty + day.total_sleeper + day.total_off_duty
}

/// Distance and driving-time figures for the route summary.
///
/// [`DrivingEstimate::Pending`] is a display default shown before any result
/// exists. It is never derived from a route and renders as such.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum DrivingEstimate {
    /// Placeholder figures awaiting a planned trip.
    Pending {
        /// Placeholder distance in miles.
        distance_miles: f64,
        /// Placeholder driving hours.
        hours: f64,
    },
    /// Figures derived from a service result.
    Computed {
        /// Route distance reported by the service.
        distance_miles: f64,
        /// Distance divided by the average speed.
        hours: f64,
    },
}

impl DrivingEstimate {
    /// The placeholder estimate.
    #[must_use]
    pub const fn pending() -> Self {
        Self::Pending {
            distance_miles: PLACEHOLDER_DISTANCE_MILES,
            hours: PLACEHOLDER_DRIVING_HOURS,
        }
    }

    /// Estimate derived from a reported route distance.
    #[must_use]
    pub fn for_distance(total_distance_miles: f64) -> Self {
        Self::Computed {
            distance_miles: total_distance_miles,
            hours: estimated_driving_hours(total_distance_miles),
        }
    }

    /// Reported or placeholder distance.
    #[must_use]
    pub const fn distance_miles(&self) -> f64 {
        match *self {
            Self::Pending { distance_miles, .. } | Self::Computed { distance_miles, .. } => {
                distance_miles
            }
        }
    }

    /// Derived or placeholder driving hours.
    #[must_use]
    pub const fn hours(&self) -> f64 {
        match *self {
            Self::Pending { hours, .. } | Self::Computed { hours, .. } => hours,
        }
    }

    /// Whether the figures are the placeholder.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// Trip-level compliance figures shown in the banner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComplianceSummary {
    /// Hours already used before the trip.
    pub cycle_used_hours: f64,
    /// Driving and on-duty hours the trip adds.
    pub trip_hours: f64,
    /// Hours left in the cycle after the trip.
    pub remaining_hours: f64,
}

impl ComplianceSummary {
    /// Aggregate a log collection against the hours already used.
    #[must_use]
    pub fn from_logs(current_cycle_used_hours: f64, logs: &[DayLog]) -> Self {
        let trip_hours = total_trip_hours(logs);
        Self {
            cycle_used_hours: current_cycle_used_hours,
            trip_hours,
            remaining_hours: remaining_cycle_hours(current_cycle_used_hours, trip_hours),
        }
    }

    /// Whether the trip exhausts the cycle.
    #[must_use]
    pub const fn cycle_exhausted(&self) -> bool {
        self.remaining_hours <= 0.0
    }
}
