//! Command-line front end for the Haulplan trip planner.
//!
//! The `plan` subcommand sends one trip to the planning service, keeps the
//! route on an in-memory map, and prints the resulting duty logs and
//! compliance figures as text or JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod error;
mod plan;
mod render;

pub use error::CliError;
use plan::{PlanArgs, run_plan};

const ARG_PLAN_REQUEST: &str = "request";
const ARG_PLAN_CURRENT: &str = "current";
const ARG_PLAN_PICKUP: &str = "pickup";
const ARG_PLAN_DROPOFF: &str = "dropoff";
const ARG_PLAN_CYCLE_USED: &str = "cycle-used";
const ARG_PLAN_SERVICE_URL: &str = "service-url";
const ARG_PLAN_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_PLAN_FORMAT: &str = "format";
const ENV_PLAN_CURRENT: &str = "HAULPLAN_CMDS_PLAN_CURRENT";
const ENV_PLAN_PICKUP: &str = "HAULPLAN_CMDS_PLAN_PICKUP";
const ENV_PLAN_DROPOFF: &str = "HAULPLAN_CMDS_PLAN_DROPOFF";
const ENV_PLAN_CYCLE_USED: &str = "HAULPLAN_CMDS_PLAN_CYCLE_USED";

/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Run the Haulplan CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

/// Install a stderr `tracing` subscriber honouring `RUST_LOG`.
///
/// Records emitted through the `log` facade by the library crates are
/// bridged into the same subscriber. Calling this twice is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        log::debug!("logging subscriber already installed");
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "haulplan",
    about = "Plan truck trips against the Hours-of-Service duty cycle",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a trip and print its route, duty logs and cycle compliance.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
