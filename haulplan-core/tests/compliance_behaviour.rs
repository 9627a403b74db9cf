//! Behavioural tests for the compliance aggregator.

use haulplan_core::test_support::{sample_day, sample_logs};
use haulplan_core::{ComplianceSummary, DayLog};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::{Cell, RefCell};

#[fixture]
fn used() -> Cell<f64> {
    Cell::new(0.0)
}

#[fixture]
fn logs() -> RefCell<Vec<DayLog>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn summary() -> RefCell<Option<ComplianceSummary>> {
    RefCell::new(None)
}

#[given("{hours} hours already used in the cycle")]
fn given_used(hours: f64, #[from(used)] used: &Cell<f64>) {
    used.set(hours);
}

#[given("day logs totalling 30 driving and on-duty hours")]
fn given_thirty_hours(#[from(logs)] logs: &RefCell<Vec<DayLog>>) {
    *logs.borrow_mut() = sample_logs();
}

#[given("no day logs")]
fn given_no_logs(#[from(logs)] logs: &RefCell<Vec<DayLog>>) {
    logs.borrow_mut().clear();
}

#[when("the compliance summary is computed")]
fn when_computed(
    #[from(used)] used: &Cell<f64>,
    #[from(logs)] logs: &RefCell<Vec<DayLog>>,
    #[from(summary)] summary: &RefCell<Option<ComplianceSummary>>,
) {
    *summary.borrow_mut() = Some(ComplianceSummary::from_logs(used.get(), &logs.borrow()));
}

#[then("{hours} hours remain in the cycle")]
#[expect(
    clippy::float_arithmetic,
    reason = "test uses float maths for assertions"
)]
fn then_remaining(hours: f64, #[from(summary)] summary: &RefCell<Option<ComplianceSummary>>) {
    let borrowed = summary.borrow();
    let summary = borrowed.as_ref().expect("summary must be computed");
    assert!(
        (summary.remaining_hours - hours).abs() <= 1e-9,
        "expected {hours}, got {}",
        summary.remaining_hours
    );
    assert!(summary.remaining_hours >= 0.0);
}

#[then("the cycle is reported as exhausted")]
fn then_exhausted(#[from(summary)] summary: &RefCell<Option<ComplianceSummary>>) {
    let borrowed = summary.borrow();
    let summary = borrowed.as_ref().expect("summary must be computed");
    assert!(summary.cycle_exhausted());
}

#[scenario(path = "tests/features/compliance.feature", index = 0)]
fn within_cycle(
    used: Cell<f64>,
    logs: RefCell<Vec<DayLog>>,
    summary: RefCell<Option<ComplianceSummary>>,
) {
    let _ = (used, logs, summary);
}

#[scenario(path = "tests/features/compliance.feature", index = 1)]
fn floored_at_zero(
    used: Cell<f64>,
    logs: RefCell<Vec<DayLog>>,
    summary: RefCell<Option<ComplianceSummary>>,
) {
    let _ = (used, logs, summary);
}

#[scenario(path = "tests/features/compliance.feature", index = 2)]
fn no_logs(used: Cell<f64>, logs: RefCell<Vec<DayLog>>, summary: RefCell<Option<ComplianceSummary>>) {
    let _ = (used, logs, summary);
}

#[test]
fn single_day_totals_feed_the_summary() {
    let summary = ComplianceSummary::from_logs(0.0, &[sample_day(1, 11.0, 3.0)]);
    assert_eq!(summary.trip_hours, 14.0);
    assert_eq!(summary.remaining_hours, 56.0);
}
