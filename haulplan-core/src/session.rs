//! Explicit result pipeline tying the lifecycle to the map and observers.
//!
//! Each applied result fires exactly one notification: the map is rebuilt
//! and every registered [`ResultObserver`] runs, in that order. Stale replies
//! fire nothing.

use thiserror::Error;

use crate::lifecycle::{AppliedResult, RequestLifecycle, SubmissionTicket, Transition};
use crate::map::{MapBackend, MapSyncController, MapSyncError};
use crate::planner::{PlanError, TripPlanner, TripResult};
use crate::trip::{TripRequest, TripRequestError};
use crate::view::{TripViewModel, ViewModelAssembler};

/// Receiver of lifecycle notifications.
pub trait ResultObserver {
    /// Called once for every result that replaces the stored one.
    fn on_result_changed(&mut self, applied: &AppliedResult);

    /// Called once for every error that replaces the stored one.
    fn on_error_changed(&mut self, _message: &str) {}
}

/// A reply was applied to the lifecycle but its route could not be drawn.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("result stored but the map was not updated: {source}")]
pub struct RouteDrawError {
    /// What the reply did to the lifecycle before drawing failed.
    pub transition: Transition,
    /// Why the map refused the route.
    #[source]
    pub source: MapSyncError,
}

/// Errors returned by [`TripSession`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The form values were rejected before dispatch.
    #[error(transparent)]
    InvalidRequest(#[from] TripRequestError),
    /// The reply was applied but the map could not show it.
    #[error(transparent)]
    Map(#[from] RouteDrawError),
}

/// A planner screen: lifecycle, map and observers driven together.
///
/// # Examples
/// ```
/// use haulplan_core::test_support::{sample_request, sample_result, ScriptedTripPlanner};
/// use haulplan_core::{HeadlessMap, RequestState, TripSession};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let planner = ScriptedTripPlanner::new().with_reply(Ok(sample_result()));
/// let mut session = TripSession::new(HeadlessMap::new());
/// session.initialize_map("trip-map")?;
///
/// session.plan(&planner, &sample_request()).await?;
///
/// assert_eq!(session.lifecycle().state(), RequestState::Success);
/// assert_eq!(session.map().layer_count(), 5);
/// # Ok(())
/// # }
/// ```
pub struct TripSession<B: MapBackend> {
    lifecycle: RequestLifecycle,
    map: MapSyncController<B>,
    observers: Vec<Box<dyn ResultObserver + Send>>,
}

impl<B: MapBackend> TripSession<B> {
    /// Session drawing on `backend`.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_controller(MapSyncController::new(backend))
    }

    /// Session around a configured controller.
    #[must_use]
    pub fn with_controller(map: MapSyncController<B>) -> Self {
        Self {
            lifecycle: RequestLifecycle::new(),
            map,
            observers: Vec::new(),
        }
    }

    /// Register an observer.
    pub fn add_observer(&mut self, observer: Box<dyn ResultObserver + Send>) {
        self.observers.push(observer);
    }

    /// Bind the map and show the stored route, if any.
    ///
    /// # Errors
    /// Returns [`MapSyncError`] when the widget rejects the map or a layer.
    pub fn initialize_map(&mut self, container: &str) -> Result<(), MapSyncError> {
        self.map.initialize(container)?;
        if let Some(applied) = self.lifecycle.applied() {
            self.map.apply_route(&applied.result.route, &applied.labels)?;
        }
        Ok(())
    }

    /// Validate `request` and start a submission.
    ///
    /// # Errors
    /// Returns [`TripRequestError`] without touching the lifecycle when the
    /// form values are invalid.
    pub fn submit(&mut self, request: &TripRequest) -> Result<SubmissionTicket, TripRequestError> {
        request.validate()?;
        Ok(self.lifecycle.submit(request))
    }

    /// Apply a reply and fan the change out.
    ///
    /// # Errors
    /// Returns [`RouteDrawError`] when the stored result could not be drawn.
    /// The result itself is applied and observers are notified regardless;
    /// the error carries the transition that was applied.
    pub fn complete(
        &mut self,
        ticket: &SubmissionTicket,
        reply: Result<TripResult, PlanError>,
    ) -> Result<Transition, RouteDrawError> {
        let transition = self.lifecycle.complete(ticket, reply);
        let notified = match transition {
            Transition::ResultChanged => self.notify_result(),
            Transition::ErrorChanged => {
                if let Some(message) = self.lifecycle.error() {
                    for observer in &mut self.observers {
                        observer.on_error_changed(message);
                    }
                }
                Ok(())
            }
            Transition::Stale => Ok(()),
        };
        notified
            .map(|()| transition)
            .map_err(|source| RouteDrawError { transition, source })
    }

    /// Submit `request` to `planner` and apply the reply.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidRequest`] for invalid form values and
    /// [`SessionError::Map`] when the result could not be drawn. Service
    /// failures are not errors here; they land in the lifecycle.
    pub async fn plan<P>(
        &mut self,
        planner: &P,
        request: &TripRequest,
    ) -> Result<Transition, SessionError>
    where
        P: TripPlanner + ?Sized,
    {
        let ticket = self.submit(request)?;
        let reply = planner.plan_trip(request).await;
        Ok(self.complete(&ticket, reply)?)
    }

    /// Display state for the values currently in the form.
    #[must_use]
    pub fn view_model(&self, form: &TripRequest) -> TripViewModel {
        ViewModelAssembler::assemble(form, &self.lifecycle)
    }

    /// Release the map. Stored results are kept.
    pub fn teardown(&mut self) {
        self.map.teardown();
    }

    /// The request lifecycle.
    #[must_use]
    pub const fn lifecycle(&self) -> &RequestLifecycle {
        &self.lifecycle
    }

    /// The map controller.
    #[must_use]
    pub const fn map(&self) -> &MapSyncController<B> {
        &self.map
    }

    fn notify_result(&mut self) -> Result<(), MapSyncError> {
        let Some(applied) = self.lifecycle.applied() else {
            return Ok(());
        };
        let drawn = if self.map.is_initialized() {
            self.map.apply_route(&applied.result.route, &applied.labels)
        } else {
            log::debug!(
                "map not initialised; route for submission {} will be drawn on initialise",
                applied.sequence
            );
            Ok(())
        };
        if let Err(err) = &drawn {
            log::warn!("failed to draw route for submission {}: {err}", applied.sequence);
        }
        for observer in &mut self.observers {
            observer.on_result_changed(applied);
        }
        drawn
    }
}
