//! Rendering tests for the plan output formats.

use crate::plan::PlanOutcome;
use crate::render::{MapSnapshot, render_text, write_json};
use haulplan_core::test_support::{sample_request, sample_result};
use haulplan_core::{HeadlessMap, TripSession};
use rstest::{fixture, rstest};

#[fixture]
fn outcome() -> PlanOutcome {
    let mut session = TripSession::new(HeadlessMap::new());
    session.initialize_map("haulplan-map").expect("map initialises");
    let ticket = session.submit(&sample_request()).expect("valid request");
    session
        .complete(&ticket, Ok(sample_result()))
        .expect("route drawn");
    PlanOutcome {
        view: session.view_model(&sample_request()),
        map: MapSnapshot::capture(session.map()),
    }
}

#[rstest]
fn text_lists_summary_banner_and_cards(outcome: PlanOutcome) {
    let text = render_text(&outcome.view, &outcome.map);

    assert!(text.starts_with("Route: Chicago, IL → St. Louis, MO → Dallas, TX\n"));
    assert!(text.contains("Distance: 750.0 mi, 13.6 h driving at 55 mph\n"));
    assert!(text.contains(
        "Compliance: 22.5h used + 30.0h this trip, 17.5h remaining in the 70-hour cycle"
    ));
    assert!(text.contains("Day 1: 24.0 h logged"));
    assert!(text.contains("Day 2: 24.0 h logged"));
    assert!(text.contains("   16.0h  Sleeper Berth    8.0h  blue"));
    assert!(!text.contains("estimate pending"));
}

#[rstest]
fn text_describes_the_map(outcome: PlanOutcome) {
    let text = render_text(&outcome.view, &outcome.map);

    assert!(text.contains("Map: 3 marker(s), route line of 3 point(s)"));
    assert!(text.contains("  Current Location: Chicago, IL (41.880, -87.630)"));
    assert!(text.contains("with 50 px padding"));
}

#[rstest]
fn route_line_follows_the_tracked_layer(outcome: PlanOutcome) {
    assert_eq!(
        outcome.map.route_line,
        vec![[41.88, -87.63], [38.63, -90.20], [32.78, -96.80]]
    );
}

#[rstest]
fn pending_estimate_is_tagged() {
    let session = TripSession::new(HeadlessMap::new());
    let view = session.view_model(&sample_request());

    let text = render_text(&view, &MapSnapshot::default());

    assert!(text.contains("(estimate pending)"));
    assert!(text.contains("No duty logs returned."));
    assert!(!text.contains("Compliance:"));
}

#[rstest]
fn json_nests_trip_and_map(outcome: PlanOutcome) {
    let mut buffer = Vec::new();
    write_json(&mut buffer, &outcome).expect("json written");

    let value: serde_json::Value = serde_json::from_slice(&buffer).expect("valid JSON");
    assert_eq!(value["trip"]["status"], "success");
    assert_eq!(value["trip"]["estimate"]["status"], "computed");
    assert_eq!(value["trip"]["day_cards"][0]["blocks"][2]["start_hour"], 5.0);
    assert_eq!(value["map"]["markers"][2]["role"], "dropoff");
    assert_eq!(value["map"]["fitted"]["padding_px"], 50);
}
