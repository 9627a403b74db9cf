//! Display state derived from the form, the lifecycle and the stored result.
//!
//! [`ViewModelAssembler::assemble`] recomputes every field on each call. The
//! view model holds no state of its own and is thrown away after rendering.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::compliance::{ComplianceSummary, DrivingEstimate, daily_total};
use crate::duty_log::{Activity, DayLog};
use crate::lifecycle::{RequestLifecycle, RequestState};
use crate::trip::TripRequest;

/// One activity drawn on the 24-hour log grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ActivityBlock {
    /// Duty status.
    pub activity: Activity,
    /// Display label for the status.
    pub label: &'static str,
    /// Hours from the start of the day at which the block begins.
    pub start_hour: f64,
    /// Length of the block in hours.
    pub duration_hours: f64,
    /// Colour supplied by the service.
    pub color_tag: String,
}

/// A single day's log card.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DayCard {
    /// One-based day number.
    pub day: u32,
    /// Blocks in chronological order.
    pub blocks: Vec<ActivityBlock>,
    /// Hours driving.
    pub total_driving: f64,
    /// Hours on duty, not driving.
    pub total_on_duty: f64,
    /// Hours in the sleeper berth.
    pub total_sleeper: f64,
    /// Hours off duty.
    pub total_off_duty: f64,
    /// Sum of the four totals, unchecked.
    pub total_hours: f64,
}

impl DayCard {
    #[expect(
        clippy::float_arithmetic,
        reason = "block offsets accumulate entry durations across the day"
    )]
    fn from_log(log: &DayLog) -> Self {
        let mut start_hour = 0.0;
        let blocks = log
            .entries
            .iter()
            .map(|entry| {
                let block = ActivityBlock {
                    activity: entry.activity,
                    label: entry.activity.label(),
                    start_hour,
                    duration_hours: entry.duration_hours,
                    color_tag: entry.color_tag.clone(),
                };
                start_hour += entry.duration_hours;
                block
            })
            .collect();
        Self {
            day: log.day,
            blocks,
            total_driving: log.total_driving,
            total_on_duty: log.total_on_duty,
            total_sleeper: log.total_sleeper,
            total_off_duty: log.total_off_duty,
            total_hours: daily_total(log),
        }
    }
}

/// Compliance figures with their banner text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ComplianceBanner {
    /// Aggregated figures.
    pub summary: ComplianceSummary,
    /// Human-readable banner.
    pub text: String,
}

impl ComplianceBanner {
    fn new(summary: ComplianceSummary) -> Self {
        let text = if summary.cycle_exhausted() {
            format!(
                "Cycle limit reached: {:.1}h used + {:.1}h this trip leaves no hours in the 70-hour cycle",
                summary.cycle_used_hours, summary.trip_hours
            )
        } else {
            format!(
                "{:.1}h used + {:.1}h this trip, {:.1}h remaining in the 70-hour cycle",
                summary.cycle_used_hours, summary.trip_hours, summary.remaining_hours
            )
        };
        Self { summary, text }
    }
}

/// Everything the rendering layer shows.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TripViewModel {
    /// Lifecycle state.
    pub status: RequestState,
    /// Whether the submit control should be disabled.
    pub submitting: bool,
    /// Stop names joined in route order.
    pub route_summary: String,
    /// Distance and driving-time estimate, pending before any result.
    pub estimate: DrivingEstimate,
    /// Compliance banner, present once a result exists.
    pub compliance: Option<ComplianceBanner>,
    /// One card per logged day.
    pub day_cards: Vec<DayCard>,
    /// The latest error message.
    pub error_banner: Option<String>,
}

/// Builds [`TripViewModel`]s.
///
/// # Examples
/// ```
/// use haulplan_core::{RequestLifecycle, TripRequest, ViewModelAssembler};
///
/// let form = TripRequest::new("Chicago, IL", "St. Louis, MO", "Dallas, TX", 22.5)?;
/// let view = ViewModelAssembler::assemble(&form, &RequestLifecycle::new());
///
/// assert_eq!(view.route_summary, "Chicago, IL → St. Louis, MO → Dallas, TX");
/// assert!(view.estimate.is_pending());
/// assert!(view.compliance.is_none());
/// # Ok::<(), haulplan_core::TripRequestError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewModelAssembler;

impl ViewModelAssembler {
    /// Derive the view model.
    ///
    /// The route summary and the cycle hours come from `form`, which holds
    /// the values currently entered. Distance, logs and compliance come from
    /// the last successful result, which survives later failures.
    #[must_use]
    pub fn assemble(form: &TripRequest, lifecycle: &RequestLifecycle) -> TripViewModel {
        let result = lifecycle.result();
        let estimate = result.map_or_else(DrivingEstimate::pending, |result| {
            DrivingEstimate::for_distance(result.total_distance_miles)
        });
        let compliance = result.map(|result| {
            ComplianceBanner::new(ComplianceSummary::from_logs(
                form.current_cycle_used_hours,
                &result.logs,
            ))
        });
        let day_cards = result
            .map(|result| result.logs.iter().map(DayCard::from_log).collect())
            .unwrap_or_default();

        TripViewModel {
            status: lifecycle.state(),
            submitting: lifecycle.is_submitting(),
            route_summary: format!(
                "{} → {} → {}",
                form.current_location, form.pickup_location, form.dropoff_location
            ),
            estimate,
            compliance,
            day_cards,
            error_banner: lifecycle.error().map(str::to_owned),
        }
    }
}
