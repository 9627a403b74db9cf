//! Error types emitted by the Haulplan CLI.
//!
//! Most helpers return `Result<_, CliError>`, so keep variants small and box
//! nothing large inline.

use std::sync::Arc;

use camino::Utf8PathBuf;
use haulplan_core::{MapSyncError, RouteDrawError, SessionError, TripRequestError};
use haulplan_data::planning::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the Haulplan CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The request file could not be opened or read.
    #[error("failed to open trip request at {path:?}: {source}")]
    OpenTripRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The request file is not a valid JSON trip request.
    #[error("failed to parse trip request JSON at {path:?}: {source}")]
    ParseTripRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The merged trip parameters were rejected.
    #[error("invalid trip request: {0}")]
    InvalidTripRequest(#[from] TripRequestError),
    /// The HTTP planner could not be built.
    #[error("failed to build trip planner for {base_url:?}: {source}")]
    BuildTripPlanner {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The async runtime could not start.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The headless map rejected an operation.
    #[error("map update failed: {0}")]
    Map(#[from] MapSyncError),
    /// The plan was stored but its route could not be drawn.
    #[error(transparent)]
    DrawRoute(#[from] RouteDrawError),
    /// The planning service reported a failure; carries the banner text.
    #[error("{message}")]
    PlanFailed { message: String },
    /// Serializing the plan output failed.
    #[error("failed to serialize plan output: {0}")]
    SerializePlanOutput(#[source] serde_json::Error),
    /// Writing the plan output failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}

impl From<SessionError> for CliError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::InvalidRequest(source) => Self::InvalidTripRequest(source),
            SessionError::Map(source) => Self::DrawRoute(source),
        }
    }
}
