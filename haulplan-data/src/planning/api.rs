//! Wire types for the trip-planning service's `POST /api/trip/` endpoint.
//!
//! The service answers with a `success` flag, the generated day logs and a
//! route of `[latitude, longitude]` pairs. Failures carry an `error` message.

use haulplan_core::{
    Activity, ActivityEntry, DayLog, PlanError, Route, TripRequest, TripResult, route_point,
};
use serde::{Deserialize, Serialize};

/// Request body sent to the service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequestBody<'a> {
    /// Driver's present location.
    pub current_location: &'a str,
    /// Pickup location.
    pub pickup_location: &'a str,
    /// Dropoff location.
    pub dropoff_location: &'a str,
    /// Hours already used in the cycle.
    pub current_cycle_used: f64,
}

impl<'a> From<&'a TripRequest> for TripRequestBody<'a> {
    fn from(request: &'a TripRequest) -> Self {
        Self {
            current_location: &request.current_location,
            pickup_location: &request.pickup_location,
            dropoff_location: &request.dropoff_location,
            current_cycle_used: request.current_cycle_used_hours,
        }
    }
}

/// Top-level response.
#[derive(Debug, Deserialize)]
pub struct TripResponse {
    /// Whether the service produced a plan.
    pub success: Option<bool>,
    /// Day logs, one per trip day.
    #[serde(default)]
    pub logs: Vec<DayLogBody>,
    /// Route coordinates and distance.
    pub route: Option<RouteBody>,
    /// Failure message.
    pub error: Option<String>,
}

/// Route section of the response.
#[derive(Debug, Deserialize)]
pub struct RouteBody {
    /// `[latitude, longitude]` pairs for current, pickup and dropoff.
    pub route_points: Vec<[f64; 2]>,
    /// Route length in miles.
    pub total_distance: f64,
}

/// One day's log.
#[derive(Debug, Deserialize)]
pub struct DayLogBody {
    /// One-based day number.
    pub day: u32,
    /// Entries in chronological order.
    #[serde(default)]
    pub entries: Vec<EntryBody>,
    /// Hours driving.
    #[serde(default)]
    pub total_driving: f64,
    /// Hours on duty, not driving.
    #[serde(default)]
    pub total_on_duty: f64,
    /// Hours in the sleeper berth.
    #[serde(default)]
    pub total_sleeper: f64,
    /// Hours off duty.
    #[serde(default)]
    pub total_off_duty: f64,
}

/// One log entry.
#[derive(Debug, Deserialize)]
pub struct EntryBody {
    /// Duty status name.
    pub activity: String,
    /// Length in hours.
    pub duration: f64,
    /// Display colour.
    #[serde(default)]
    pub color: String,
}

/// Parse a duty status name as sent by the service.
///
/// Matching ignores case and surrounding whitespace, and accepts the
/// `on-duty`, `off-duty` and `sleeper` spellings.
#[must_use]
pub fn parse_activity(name: &str) -> Option<Activity> {
    match name.trim().to_ascii_lowercase().as_str() {
        "driving" => Some(Activity::Driving),
        "on_duty" | "on-duty" => Some(Activity::OnDuty),
        "sleeper_berth" | "sleeper" => Some(Activity::SleeperBerth),
        "off_duty" | "off-duty" => Some(Activity::OffDuty),
        _ => None,
    }
}

fn contract(reason: impl Into<String>) -> PlanError {
    PlanError::Contract {
        reason: reason.into(),
    }
}

impl TripResponse {
    /// The service-reported failure message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }

    /// Convert a decoded response into a result or a classified failure.
    ///
    /// # Errors
    /// Returns [`PlanError::Service`] when the service reports a failure and
    /// [`PlanError::Contract`] when a successful reply is malformed.
    pub fn into_result(self) -> Result<TripResult, PlanError> {
        match self.success {
            Some(true) => {}
            Some(false) => {
                return Err(PlanError::Service {
                    message: self.error_message().unwrap_or_default().to_owned(),
                });
            }
            None => return Err(contract("response is missing the success flag")),
        }

        let route_body = self
            .route
            .ok_or_else(|| contract("successful response is missing the route"))?;
        let points = route_body
            .route_points
            .into_iter()
            .map(|[lat, lng]| route_point(lat, lng))
            .collect::<Vec<_>>();
        let route = Route::try_from(points).map_err(|err| contract(err.to_string()))?;
        let logs = self
            .logs
            .into_iter()
            .map(DayLogBody::into_day_log)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TripResult {
            route,
            total_distance_miles: route_body.total_distance,
            logs,
        })
    }
}

impl DayLogBody {
    fn into_day_log(self) -> Result<DayLog, PlanError> {
        let day = self.day;
        let entries = self
            .entries
            .into_iter()
            .map(|entry| {
                let activity = parse_activity(&entry.activity).ok_or_else(|| {
                    contract(format!(
                        "day {day} has unknown activity {:?}",
                        entry.activity
                    ))
                })?;
                Ok(ActivityEntry {
                    activity,
                    duration_hours: entry.duration,
                    color_tag: entry.color,
                })
            })
            .collect::<Result<Vec<_>, PlanError>>()?;
        Ok(DayLog {
            day,
            entries,
            total_driving: self.total_driving,
            total_on_duty: self.total_on_duty,
            total_sleeper: self.total_sleeper,
            total_off_duty: self.total_off_duty,
        })
    }
}
