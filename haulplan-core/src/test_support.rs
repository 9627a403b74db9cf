//! Fixtures and doubles shared by unit, behaviour and downstream tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use geo::Rect;

use crate::map::{
    HeadlessMap, LayerId, MapBackend, MapBackendError, MapId, MapView, MarkerSpec, PolylineSpec,
    TileSource,
};
use crate::{
    Activity, ActivityEntry, DayLog, PlanError, Route, RouteLabels, TripPlanner, TripRequest,
    TripResult, route_point,
};

/// Chicago to St. Louis to Dallas with 22.5 hours already used.
#[must_use]
pub fn sample_request() -> TripRequest {
    TripRequest {
        current_location: "Chicago, IL".to_owned(),
        pickup_location: "St. Louis, MO".to_owned(),
        dropoff_location: "Dallas, TX".to_owned(),
        current_cycle_used_hours: 22.5,
    }
}

/// Labels of [`sample_request`].
#[must_use]
pub fn sample_labels() -> RouteLabels {
    sample_request().labels()
}

/// Coordinates of [`sample_request`]'s stops.
#[must_use]
pub fn sample_route() -> Route {
    Route::new(
        route_point(41.88, -87.63),
        route_point(38.63, -90.20),
        route_point(32.78, -96.80),
    )
}

/// One day of log entries with the given driving and on-duty hours.
///
/// Sleeper time is fixed at eight hours and off-duty time fills the rest of the
/// day.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "off-duty hours fill the remainder of the sample day"
)]
pub fn sample_day(day: u32, driving: f64, on_duty: f64) -> DayLog {
    let sleeper = 8.0;
    let off_duty = 24.0 - sleeper - driving - on_duty;
    let entry = |activity: Activity, hours: f64, color: &str| ActivityEntry {
        activity,
        duration_hours: hours,
        color_tag: color.to_owned(),
    };
    DayLog {
        day,
        entries: vec![
            entry(Activity::OffDuty, off_duty, "gray"),
            entry(Activity::OnDuty, on_duty, "yellow"),
            entry(Activity::Driving, driving, "green"),
            entry(Activity::SleeperBerth, sleeper, "blue"),
        ],
        total_driving: driving,
        total_on_duty: on_duty,
        total_sleeper: sleeper,
        total_off_duty: off_duty,
    }
}

/// Two days whose driving and on-duty hours sum to 30.
#[must_use]
pub fn sample_logs() -> Vec<DayLog> {
    vec![sample_day(1, 11.0, 3.0), sample_day(2, 10.0, 6.0)]
}

/// A 750-mile result over [`sample_logs`].
#[must_use]
pub fn sample_result() -> TripResult {
    sample_result_with_distance(750.0)
}

/// [`sample_result`] with a different reported distance.
#[must_use]
pub fn sample_result_with_distance(total_distance_miles: f64) -> TripResult {
    TripResult {
        route: sample_route(),
        total_distance_miles,
        logs: sample_logs(),
    }
}

/// [`TripPlanner`] answering from a queue of scripted replies.
///
/// Requests are recorded in arrival order. An exhausted script answers with a
/// transport failure.
#[derive(Debug, Default)]
pub struct ScriptedTripPlanner {
    replies: Mutex<VecDeque<Result<TripResult, PlanError>>>,
    requests: Mutex<Vec<TripRequest>>,
}

impl ScriptedTripPlanner {
    /// Planner with no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply.
    #[must_use]
    pub fn with_reply(self, reply: Result<TripResult, PlanError>) -> Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
        self
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<TripRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TripPlanner for ScriptedTripPlanner {
    async fn plan_trip(&self, request: &TripRequest) -> Result<TripResult, PlanError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or_else(|| {
                Err(PlanError::Transport {
                    url: "scripted://planner".to_owned(),
                    message: "no scripted reply left".to_owned(),
                })
            })
    }
}

/// [`HeadlessMap`] wrapper that rejects one marker.
///
/// The n-th `add_marker` call (one-based) fails; every other call is
/// forwarded.
#[derive(Debug, Default)]
pub struct FailingMarkerBackend {
    inner: HeadlessMap,
    fail_on: usize,
    markers_seen: usize,
}

impl FailingMarkerBackend {
    /// Fail the `nth` marker added.
    #[must_use]
    pub fn failing_on(nth: usize) -> Self {
        Self {
            inner: HeadlessMap::new(),
            fail_on: nth,
            markers_seen: 0,
        }
    }

    /// The wrapped backend.
    #[must_use]
    pub const fn inner(&self) -> &HeadlessMap {
        &self.inner
    }
}

impl MapBackend for FailingMarkerBackend {
    fn create_map(&mut self, container: &str, view: &MapView) -> Result<MapId, MapBackendError> {
        self.inner.create_map(container, view)
    }

    fn add_tile_layer(
        &mut self,
        map: MapId,
        tiles: &TileSource,
    ) -> Result<LayerId, MapBackendError> {
        self.inner.add_tile_layer(map, tiles)
    }

    fn add_marker(&mut self, map: MapId, marker: &MarkerSpec) -> Result<LayerId, MapBackendError> {
        self.markers_seen += 1;
        if self.markers_seen == self.fail_on {
            return Err(MapBackendError::Layer(format!(
                "marker {} rejected",
                marker.role
            )));
        }
        self.inner.add_marker(map, marker)
    }

    fn add_polyline(
        &mut self,
        map: MapId,
        polyline: &PolylineSpec,
    ) -> Result<LayerId, MapBackendError> {
        self.inner.add_polyline(map, polyline)
    }

    fn remove_layer(&mut self, map: MapId, layer: LayerId) {
        self.inner.remove_layer(map, layer);
    }

    fn fit_bounds(&mut self, map: MapId, bounds: Rect<f64>, padding_px: u32) {
        self.inner.fit_bounds(map, bounds, padding_px);
    }

    fn destroy_map(&mut self, map: MapId) {
        self.inner.destroy_map(map);
    }
}

/// [`HeadlessMap`] wrapper whose tile layer is refused a set number of times.
///
/// The first `failures` calls to `add_tile_layer` fail; later calls and every
/// other operation are forwarded.
#[derive(Debug, Default)]
pub struct FailingTileBackend {
    inner: HeadlessMap,
    failures_left: usize,
}

impl FailingTileBackend {
    /// Refuse the first `failures` tile layers.
    #[must_use]
    pub fn failing_first(failures: usize) -> Self {
        Self {
            inner: HeadlessMap::new(),
            failures_left: failures,
        }
    }

    /// The wrapped backend.
    #[must_use]
    pub const fn inner(&self) -> &HeadlessMap {
        &self.inner
    }
}

impl MapBackend for FailingTileBackend {
    fn create_map(&mut self, container: &str, view: &MapView) -> Result<MapId, MapBackendError> {
        self.inner.create_map(container, view)
    }

    fn add_tile_layer(
        &mut self,
        map: MapId,
        tiles: &TileSource,
    ) -> Result<LayerId, MapBackendError> {
        if let Some(left) = self.failures_left.checked_sub(1) {
            self.failures_left = left;
            return Err(MapBackendError::Layer(format!(
                "tiles from {} rejected",
                tiles.url_template
            )));
        }
        self.inner.add_tile_layer(map, tiles)
    }

    fn add_marker(&mut self, map: MapId, marker: &MarkerSpec) -> Result<LayerId, MapBackendError> {
        self.inner.add_marker(map, marker)
    }

    fn add_polyline(
        &mut self,
        map: MapId,
        polyline: &PolylineSpec,
    ) -> Result<LayerId, MapBackendError> {
        self.inner.add_polyline(map, polyline)
    }

    fn remove_layer(&mut self, map: MapId, layer: LayerId) {
        self.inner.remove_layer(map, layer);
    }

    fn fit_bounds(&mut self, map: MapId, bounds: Rect<f64>, padding_px: u32) {
        self.inner.fit_bounds(map, bounds, padding_px);
    }

    fn destroy_map(&mut self, map: MapId) {
        self.inner.destroy_map(map);
    }
}
