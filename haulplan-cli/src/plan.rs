//! Plan command implementation for the Haulplan CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::{Parser, ValueEnum};
use haulplan_core::{HeadlessMap, TripPlanner, TripRequest, TripSession, TripViewModel};
use haulplan_data::planning::{HttpTripPlanner, HttpTripPlannerConfig};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::render::{MapSnapshot, write_json, write_text};
use crate::{
    ARG_PLAN_CURRENT, ARG_PLAN_CYCLE_USED, ARG_PLAN_DROPOFF, ARG_PLAN_FORMAT, ARG_PLAN_PICKUP,
    ARG_PLAN_SERVICE_URL, ARG_PLAN_TIMEOUT_SECS, CliError, ENV_PLAN_CURRENT, ENV_PLAN_CYCLE_USED,
    ENV_PLAN_DROPOFF, ENV_PLAN_PICKUP,
};

/// Container name the headless map is created in.
const MAP_CONTAINER: &str = "haulplan-map";

/// How the plan is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Human-readable summary and log cards.
    #[default]
    Text,
    /// Pretty-printed view model and map description.
    Json,
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a trip with the trip-planning service. Locations and \
                 the hours already used in the 70-hour cycle can come from a \
                 JSON request file, configuration files, environment \
                 variables or CLI flags; flags win.",
    about = "Plan a trip and report its duty logs"
)]
#[ortho_config(prefix = "HAULPLAN")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a trip request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Where the driver is now.
    #[arg(long = ARG_PLAN_CURRENT, value_name = "location")]
    #[serde(default)]
    pub(crate) current: Option<String>,
    /// Where the load is collected.
    #[arg(long = ARG_PLAN_PICKUP, value_name = "location")]
    #[serde(default)]
    pub(crate) pickup: Option<String>,
    /// Where the load is delivered.
    #[arg(long = ARG_PLAN_DROPOFF, value_name = "location")]
    #[serde(default)]
    pub(crate) dropoff: Option<String>,
    /// Hours already used in the current 70-hour cycle.
    #[arg(long = ARG_PLAN_CYCLE_USED, value_name = "hours")]
    #[serde(default)]
    pub(crate) cycle_used: Option<f64>,
    /// Base URL of the trip-planning service (e.g. "http://localhost:8000").
    #[arg(long = ARG_PLAN_SERVICE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) service_url: Option<String>,
    /// Seconds to wait for the service before giving up.
    #[arg(long = ARG_PLAN_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Output format.
    #[arg(long = ARG_PLAN_FORMAT, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged.with_request_file()?)
    }

    /// Fill trip fields left unset by every layer from the request file.
    pub(crate) fn with_request_file(mut self) -> Result<Self, CliError> {
        let Some(path) = self.request_path.as_deref() else {
            return Ok(self);
        };
        let file = load_trip_request(path)?;
        self.current = self.current.take().or(file.current_location);
        self.pickup = self.pickup.take().or(file.pickup_location);
        self.dropoff = self.dropoff.take().or(file.dropoff_location);
        self.cycle_used = self.cycle_used.or(file.current_cycle_used);
        Ok(self)
    }
}

/// Trip fields as written in a request file. Any of them may be omitted and
/// supplied by another layer instead.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TripRequestFile {
    pub(crate) current_location: Option<String>,
    pub(crate) pickup_location: Option<String>,
    pub(crate) dropoff_location: Option<String>,
    pub(crate) current_cycle_used: Option<f64>,
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Validated trip parameters.
    pub(crate) request: TripRequest,
    /// Base URL of the trip-planning service.
    pub(crate) service_url: String,
    /// Request timeout.
    pub(crate) timeout: Duration,
    /// Output format.
    pub(crate) format: OutputFormat,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let current = args.current.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_CURRENT,
            env: ENV_PLAN_CURRENT,
        })?;
        let pickup = args.pickup.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_PICKUP,
            env: ENV_PLAN_PICKUP,
        })?;
        let dropoff = args.dropoff.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_DROPOFF,
            env: ENV_PLAN_DROPOFF,
        })?;
        let cycle_used = args.cycle_used.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_CYCLE_USED,
            env: ENV_PLAN_CYCLE_USED,
        })?;
        let request = TripRequest::new(current, pickup, dropoff, cycle_used)?;

        let defaults = HttpTripPlannerConfig::default();
        Ok(Self {
            request,
            service_url: args.service_url.unwrap_or(defaults.base_url),
            timeout: args
                .timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
            format: args.format.unwrap_or_default(),
        })
    }
}

/// Builds a planner for the current plan invocation.
pub(super) trait TripPlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn TripPlanner>, CliError>;
}

pub(super) struct HttpTripPlannerBuilder;

impl TripPlannerBuilder for HttpTripPlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn TripPlanner>, CliError> {
        let planner_config =
            HttpTripPlannerConfig::new(config.service_url.clone()).with_timeout(config.timeout);
        let planner = HttpTripPlanner::with_config(planner_config).map_err(|source| {
            CliError::BuildTripPlanner {
                base_url: config.service_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(planner))
    }
}

/// What a successful plan produced.
#[derive(Debug)]
pub(crate) struct PlanOutcome {
    pub(crate) view: TripViewModel,
    pub(crate) map: MapSnapshot,
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = HttpTripPlannerBuilder;
    run_plan_with(args, &builder, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn TripPlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let outcome = execute_plan(&config, builder)?;
    match config.format {
        OutputFormat::Text => write_text(writer, &outcome),
        OutputFormat::Json => write_json(writer, &outcome),
    }
}

/// Run one submission against a headless map.
///
/// A service failure surfaces as [`CliError::PlanFailed`] carrying the same
/// banner text an interactive front end would show.
pub(super) fn execute_plan(
    config: &PlanConfig,
    builder: &dyn TripPlannerBuilder,
) -> Result<PlanOutcome, CliError> {
    let planner = builder.build(config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    let mut session = TripSession::new(HeadlessMap::new());
    session.initialize_map(MAP_CONTAINER)?;
    let transition = runtime.block_on(session.plan(&*planner, &config.request))?;
    log::debug!("plan finished with {transition:?}");

    if let Some(message) = session.lifecycle().error() {
        return Err(CliError::PlanFailed {
            message: message.to_owned(),
        });
    }
    let view = session.view_model(&config.request);
    let map = MapSnapshot::capture(session.map());
    session.teardown();
    Ok(PlanOutcome { view, map })
}

/// Loads a JSON-encoded trip request from disk.
pub(super) fn load_trip_request(path: &Utf8Path) -> Result<TripRequestFile, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenTripRequest {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseTripRequest {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged.with_request_file()?)
}
