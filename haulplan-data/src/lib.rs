//! Data access for the Haulplan trip planner.
//!
//! Responsibilities:
//! - Provide the HTTP adapter for the external trip-planning service.
//! - Encapsulate the service's wire format.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `haulplan-core`).
//! - Never retry; the caller decides when to submit again.
//!
//! Invariants:
//! - Thread-safe by default where feasible.
//! - No global mutable state.

pub mod planning;

pub use planning::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpTripPlanner, HttpTripPlannerConfig,
    ProviderBuildError,
};
