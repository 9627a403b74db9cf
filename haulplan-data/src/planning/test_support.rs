//! Test utilities for trip planners.
//!
//! This module provides [`StubTripPlanner`], a deterministic test double for
//! [`TripPlanner`] that returns a pre-configured reply without making HTTP
//! requests.

use async_trait::async_trait;
use haulplan_core::{PlanError, TripPlanner, TripRequest, TripResult};

/// Stub `TripPlanner` for testing.
///
/// # Example
///
/// ```
/// use haulplan_core::{PlanError, TripPlanner, TripRequest};
/// use haulplan_data::planning::test_support::StubTripPlanner;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let planner = StubTripPlanner::with_error(PlanError::Service {
///     message: "No route found".into(),
/// });
/// let request = TripRequest::new("Chicago, IL", "St. Louis, MO", "Dallas, TX", 0.0)
///     .expect("valid request");
///
/// let err = planner.plan_trip(&request).await.expect_err("stub fails");
/// assert_eq!(err.user_message(), "No route found");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StubTripPlanner {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Result(TripResult),
    Error(PlanError),
}

impl StubTripPlanner {
    /// Create a planner that returns the given result.
    #[must_use]
    pub fn with_result(result: TripResult) -> Self {
        Self {
            response: StubResponse::Result(result),
        }
    }

    /// Create a planner that returns the given error.
    #[must_use]
    pub fn with_error(error: PlanError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }
}

#[async_trait]
impl TripPlanner for StubTripPlanner {
    async fn plan_trip(&self, request: &TripRequest) -> Result<TripResult, PlanError> {
        request.validate().map_err(|err| PlanError::Contract {
            reason: err.to_string(),
        })?;
        match &self.response {
            StubResponse::Result(result) => Ok(result.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
