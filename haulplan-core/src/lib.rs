//! Core domain types and state synchronisation for the Haulplan trip planner.
//!
//! Responsibilities:
//! - Model trip requests, three-stop routes and duty logs.
//! - Keep a map widget's layers consistent with the latest route.
//! - Coordinate submissions and apply only the newest reply.
//! - Aggregate Hours-of-Service figures for display.
//!
//! Boundaries:
//! - No I/O. The trip-planning service sits behind [`TripPlanner`] and the
//!   map widget behind [`MapBackend`].
//! - Never compute distances or duty-cycle rules; only aggregate what the
//!   service returns.
//!
//! Invariants:
//! - A [`Route`] always holds exactly three points.
//! - A stored [`TripResult`] is replaced as a whole, never patched.
//! - No global mutable state.

pub mod compliance;
pub mod duty_log;
pub mod lifecycle;
pub mod map;
pub mod planner;
pub mod route;
pub mod session;
pub mod trip;
pub mod view;

#[doc(hidden)]
pub mod test_support;

pub use compliance::{
    AVERAGE_SPEED_MPH, CYCLE_LIMIT_HOURS, ComplianceSummary, DrivingEstimate,
    PLACEHOLDER_DISTANCE_MILES, PLACEHOLDER_DRIVING_HOURS, daily_total, estimated_driving_hours,
    remaining_cycle_hours, total_trip_hours,
};
pub use duty_log::{Activity, ActivityEntry, DayLog};
pub use lifecycle::{AppliedResult, RequestLifecycle, RequestState, SubmissionTicket, Transition};
pub use map::{
    DEFAULT_ZOOM, FittedBounds, HeadlessLayer, HeadlessMap, HeadlessMapState, LayerId, MapBackend,
    MapBackendError, MapId, MapLayerSet, MapSyncController, MapSyncError, MapView, MarkerSpec,
    MarkerStyle, PolylineSpec, ROUTE_PADDING_PX, TileSource,
};
pub use planner::{GENERIC_FAILURE_MESSAGE, PlanError, TripPlanner, TripResult};
pub use route::{Route, RouteError, RoutePoint, StopRole, route_point};
pub use session::{ResultObserver, RouteDrawError, SessionError, TripSession};
pub use trip::{RouteLabels, TripRequest, TripRequestError};
pub use view::{ActivityBlock, ComplianceBanner, DayCard, TripViewModel, ViewModelAssembler};
