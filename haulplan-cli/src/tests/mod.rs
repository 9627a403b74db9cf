//! Shared test harness modules for the Haulplan CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod helpers;
mod plan_unit;
mod render_unit;
