//! Facade crate for the Haulplan trip planner.
//!
//! This crate re-exports the core domain types and exposes the HTTP planner
//! behind the `http` feature flag.

#![forbid(unsafe_code)]

pub use haulplan_core::{
    Activity, ActivityEntry, ComplianceSummary, DayLog, DrivingEstimate, GENERIC_FAILURE_MESSAGE,
    HeadlessMap, MapBackend, MapBackendError, MapSyncController, MapSyncError, PlanError,
    RequestLifecycle, RequestState, ResultObserver, Route, RouteDrawError, RouteError, RouteLabels,
    SessionError, StopRole, Transition, TripPlanner, TripRequest, TripRequestError, TripResult,
    TripSession, TripViewModel, ViewModelAssembler,
};

#[cfg(feature = "http")]
pub use haulplan_data::{HttpTripPlanner, HttpTripPlannerConfig, ProviderBuildError};
