//! Test helpers for writing request files and stubbing the planner.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use haulplan_core::{PlanError, TripPlanner, TripResult};
use haulplan_data::planning::test_support::StubTripPlanner;
use tempfile::TempDir;

use crate::CliError;
use crate::plan::{PlanConfig, TripPlannerBuilder};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write test file");
}

/// A temporary directory addressed through UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

/// Hands out planners that answer with a fixed reply.
#[derive(Debug)]
pub(super) struct StubPlannerBuilder {
    reply: Result<TripResult, PlanError>,
}

impl StubPlannerBuilder {
    pub(super) const fn new(reply: Result<TripResult, PlanError>) -> Self {
        Self { reply }
    }
}

impl TripPlannerBuilder for StubPlannerBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Box<dyn TripPlanner>, CliError> {
        let planner = match &self.reply {
            Ok(result) => StubTripPlanner::with_result(result.clone()),
            Err(error) => StubTripPlanner::with_error(error.clone()),
        };
        Ok(Box::new(planner))
    }
}
