//! HTTP adapter for the trip-planning service.
//!
//! [`HttpTripPlanner`] implements [`haulplan_core::TripPlanner`] by posting
//! the trip parameters to `{base_url}/api/trip/` and classifying the reply:
//!
//! - transport failures and timeouts become [`haulplan_core::PlanError::Transport`]
//!   and [`haulplan_core::PlanError::Timeout`];
//! - `success: false` or a non-2xx status with an `error` message becomes
//!   [`haulplan_core::PlanError::Service`];
//! - a success reply that cannot be decoded or holds a route without three
//!   points becomes [`haulplan_core::PlanError::Contract`].

mod api;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use api::parse_activity;
pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpTripPlanner, HttpTripPlannerConfig,
    ProviderBuildError,
};
