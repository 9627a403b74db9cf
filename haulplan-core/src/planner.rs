//! Boundary to the external trip-planning service.
//!
//! The service geocodes the stops, measures the route and generates the day
//! logs. This crate only sees the finished [`TripResult`] or a [`PlanError`].

use async_trait::async_trait;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{DayLog, Route, TripRequest};

/// Message shown whenever the service's own message is unavailable.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to connect to the trip planning service. Please try again.";

/// A successful planning reply, applied as one unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TripResult {
    /// Coordinates of the three stops.
    pub route: Route,
    /// Route length reported by the service.
    pub total_distance_miles: f64,
    /// Generated duty logs, one per day.
    pub logs: Vec<DayLog>,
}

/// Failures from [`TripPlanner::plan_trip`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The service answered and reported a failure.
    #[error("trip planning service reported: {message}")]
    Service {
        /// Message supplied by the service.
        message: String,
    },
    /// The service answered with a non-success status and no message.
    #[error("trip planning service returned HTTP {status} for {url}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The request never completed.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        message: String,
    },
    /// The request exceeded its deadline.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The reply broke the service contract, e.g. a route without three points.
    #[error("trip planning service broke its contract: {reason}")]
    Contract {
        /// What was wrong with the reply.
        reason: String,
    },
}

impl PlanError {
    /// The single message shown to the user for this failure.
    ///
    /// Service-reported messages are shown verbatim; everything else falls
    /// back to [`GENERIC_FAILURE_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Service { message } if !message.trim().is_empty() => message,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// Whether the failure indicates an integration bug rather than a
    /// runtime condition.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Contract { .. })
    }
}

/// Submit a trip to the external planning service.
///
/// Implementations must not retry on their own; the caller decides when to
/// submit again.
#[async_trait]
pub trait TripPlanner: Send + Sync {
    /// Plan a trip, producing the route and day logs or an error.
    async fn plan_trip(&self, request: &TripRequest) -> Result<TripResult, PlanError>;
}
