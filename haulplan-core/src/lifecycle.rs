//! Submit/result state machine for trip-planning requests.
//!
//! Every submission is tagged with a monotonically increasing sequence
//! number. Only the reply carrying the latest number is applied; replies to
//! superseded submissions are discarded as stale.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{PlanError, RouteLabels, TripRequest, TripResult};

/// Observable state of the request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RequestState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A submission is in flight.
    Submitting,
    /// The latest submission produced a result.
    Success,
    /// The latest submission failed.
    Error,
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success => "success",
            Self::Error => "error",
        })
    }
}

/// Handle for one in-flight submission.
///
/// The ticket must be handed back to [`RequestLifecycle::complete`] with the
/// service reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    sequence: u64,
    labels: RouteLabels,
}

impl SubmissionTicket {
    /// Sequence number assigned at submission.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Location names of the submitted request.
    #[must_use]
    pub const fn labels(&self) -> &RouteLabels {
        &self.labels
    }
}

/// Outcome of applying a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A new result replaced the previous one.
    ResultChanged,
    /// A new error message replaced the previous one.
    ErrorChanged,
    /// The reply belonged to a superseded submission and was dropped.
    Stale,
}

/// A stored result with the labels of the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedResult {
    /// Sequence number of the producing submission.
    pub sequence: u64,
    /// The service result.
    pub result: TripResult,
    /// Location names of the producing submission.
    pub labels: RouteLabels,
}

/// State machine coordinating submissions and their replies.
///
/// A failed submission never clears the last successful result, so the
/// previous route and logs stay visible under the error banner.
///
/// # Examples
/// ```
/// use haulplan_core::{PlanError, RequestLifecycle, RequestState, Transition, TripRequest};
///
/// let mut lifecycle = RequestLifecycle::new();
/// let request = TripRequest::new("Chicago, IL", "St. Louis, MO", "Dallas, TX", 10.0)?;
/// let ticket = lifecycle.submit(&request);
/// assert_eq!(lifecycle.state(), RequestState::Submitting);
///
/// let reply = Err(PlanError::Service { message: "No route found".into() });
/// assert_eq!(lifecycle.complete(&ticket, reply), Transition::ErrorChanged);
/// assert_eq!(lifecycle.error(), Some("No route found"));
/// # Ok::<(), haulplan_core::TripRequestError>(())
/// ```
#[derive(Debug, Default)]
pub struct RequestLifecycle {
    state: RequestState,
    last_sequence: u64,
    in_flight: Option<u64>,
    current: Option<AppliedResult>,
    error: Option<String>,
}

impl RequestLifecycle {
    /// Create an idle lifecycle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a submission, superseding any submission still in flight.
    ///
    /// Clears the previous error and moves to [`RequestState::Submitting`].
    /// The previous result is kept until a new one arrives.
    pub fn submit(&mut self, request: &TripRequest) -> SubmissionTicket {
        self.last_sequence = self.last_sequence.saturating_add(1);
        let sequence = self.last_sequence;
        if let Some(superseded) = self.in_flight.replace(sequence) {
            log::debug!("submission {sequence} supersedes in-flight submission {superseded}");
        }
        self.state = RequestState::Submitting;
        self.error = None;
        log::info!(
            "submitting trip {} -> {} -> {} (sequence {sequence})",
            request.current_location,
            request.pickup_location,
            request.dropoff_location
        );
        SubmissionTicket {
            sequence,
            labels: request.labels(),
        }
    }

    /// Apply the service reply for `ticket`.
    ///
    /// Replies for anything but the latest in-flight submission are dropped.
    pub fn complete(
        &mut self,
        ticket: &SubmissionTicket,
        reply: Result<TripResult, PlanError>,
    ) -> Transition {
        if self.in_flight != Some(ticket.sequence) {
            log::warn!(
                "discarding stale reply for submission {} (latest is {})",
                ticket.sequence,
                self.last_sequence
            );
            return Transition::Stale;
        }
        self.in_flight = None;
        match reply {
            Ok(result) => {
                log::info!(
                    "submission {} succeeded: {:.1} miles over {} day(s)",
                    ticket.sequence,
                    result.total_distance_miles,
                    result.logs.len()
                );
                self.current = Some(AppliedResult {
                    sequence: ticket.sequence,
                    result,
                    labels: ticket.labels.clone(),
                });
                self.state = RequestState::Success;
                Transition::ResultChanged
            }
            Err(err) => {
                if err.is_contract_violation() {
                    log::error!("submission {} violated the service contract: {err}", ticket.sequence);
                } else {
                    log::warn!("submission {} failed: {err}", ticket.sequence);
                }
                self.error = Some(err.user_message().to_owned());
                self.state = RequestState::Error;
                Transition::ErrorChanged
            }
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> RequestState {
        self.state
    }

    /// Whether a submission is awaiting its reply.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.state, RequestState::Submitting)
    }

    /// Sequence number of the most recent submission, zero before any.
    #[must_use]
    pub const fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    /// The last successful result, if any.
    #[must_use]
    pub fn result(&self) -> Option<&TripResult> {
        self.current.as_ref().map(|applied| &applied.result)
    }

    /// The last successful result with its provenance.
    #[must_use]
    pub const fn applied(&self) -> Option<&AppliedResult> {
        self.current.as_ref()
    }

    /// The message of the latest failure, cleared on the next submission.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
