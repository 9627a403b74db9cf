//! Trip parameters collected from the planner form.
//!
//! A [`TripRequest`] lives for a single submission. Only its location names
//! outlive dispatch, carried as [`RouteLabels`] so markers can be titled once
//! the route arrives.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compliance::CYCLE_LIMIT_HOURS;
use crate::route::StopRole;

/// Parameters for one trip-planning submission.
///
/// # Examples
/// ```
/// use haulplan_core::TripRequest;
///
/// let request = TripRequest::new("Chicago, IL", "St. Louis, MO", "Dallas, TX", 22.5)?;
/// assert_eq!(request.pickup_location, "St. Louis, MO");
/// # Ok::<(), haulplan_core::TripRequestError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TripRequest {
    /// Where the driver is now.
    pub current_location: String,
    /// Where the load is collected.
    pub pickup_location: String,
    /// Where the load is delivered.
    pub dropoff_location: String,
    /// Hours already used in the current 70-hour/8-day cycle.
    #[cfg_attr(feature = "serde", serde(rename = "currentCycleUsed"))]
    pub current_cycle_used_hours: f64,
}

/// Errors returned by [`TripRequest::new`] and [`TripRequest::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripRequestError {
    /// A location name was empty or whitespace.
    #[error("{role} location must not be blank")]
    BlankLocation {
        /// Which stop was left blank.
        role: StopRole,
    },
    /// The cycle-used value fell outside `[0, 70]` or was not finite.
    #[error("current cycle used must be between 0 and 70 hours, got {hours}")]
    CycleUsedOutOfRange {
        /// Rejected value.
        hours: f64,
    },
}

impl TripRequest {
    /// Validate and construct a [`TripRequest`].
    ///
    /// # Errors
    /// Returns [`TripRequestError::BlankLocation`] for an empty location name
    /// and [`TripRequestError::CycleUsedOutOfRange`] when the cycle-used value
    /// is outside `[0, 70]`.
    pub fn new(
        current_location: impl Into<String>,
        pickup_location: impl Into<String>,
        dropoff_location: impl Into<String>,
        current_cycle_used_hours: f64,
    ) -> Result<Self, TripRequestError> {
        let request = Self {
            current_location: current_location.into(),
            pickup_location: pickup_location.into(),
            dropoff_location: dropoff_location.into(),
            current_cycle_used_hours,
        };
        request.validate()?;
        Ok(request)
    }

    /// Check the request invariants.
    ///
    /// Deserialised requests bypass [`TripRequest::new`], so callers loading
    /// requests from files run this before dispatch.
    ///
    /// # Errors
    /// See [`TripRequest::new`].
    pub fn validate(&self) -> Result<(), TripRequestError> {
        for role in StopRole::ALL {
            if self.location(role).trim().is_empty() {
                return Err(TripRequestError::BlankLocation { role });
            }
        }
        let hours = self.current_cycle_used_hours;
        if !hours.is_finite() || !(0.0..=CYCLE_LIMIT_HOURS).contains(&hours) {
            return Err(TripRequestError::CycleUsedOutOfRange { hours });
        }
        Ok(())
    }

    /// Location name for a stop role.
    #[must_use]
    pub fn location(&self, role: StopRole) -> &str {
        match role {
            StopRole::Current => &self.current_location,
            StopRole::Pickup => &self.pickup_location,
            StopRole::Dropoff => &self.dropoff_location,
        }
    }

    /// Labels used to title the route markers.
    #[must_use]
    pub fn labels(&self) -> RouteLabels {
        RouteLabels {
            current: self.current_location.clone(),
            pickup: self.pickup_location.clone(),
            dropoff: self.dropoff_location.clone(),
        }
    }
}

/// Location names for the three route stops.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteLabels {
    /// Name of the driver's current location.
    pub current: String,
    /// Name of the pickup location.
    pub pickup: String,
    /// Name of the dropoff location.
    pub dropoff: String,
}

impl RouteLabels {
    /// Name for a stop role.
    #[must_use]
    pub fn get(&self, role: StopRole) -> &str {
        match role {
            StopRole::Current => &self.current,
            StopRole::Pickup => &self.pickup,
            StopRole::Dropoff => &self.dropoff,
        }
    }
}
