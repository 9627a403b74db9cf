//! Focused unit tests covering plan CLI configuration and execution.

use super::helpers::{StubPlannerBuilder, Workspace, write_utf8};
use super::*;
use crate::plan::{
    HttpTripPlannerBuilder, OutputFormat, PlanArgs, PlanConfig, TripPlannerBuilder,
    config_from_layers_for_test, execute_plan, load_trip_request,
};
use haulplan_core::test_support::{sample_request, sample_result};
use haulplan_core::{
    GENERIC_FAILURE_MESSAGE, MapSyncError, PlanError, RouteDrawError, SessionError, Transition,
    TripRequestError,
};
use rstest::{fixture, rstest};
use std::time::Duration;

#[fixture]
fn complete_args() -> PlanArgs {
    PlanArgs {
        current: Some("Chicago, IL".to_owned()),
        pickup: Some("St. Louis, MO".to_owned()),
        dropoff: Some("Dallas, TX".to_owned()),
        cycle_used: Some(22.5),
        ..PlanArgs::default()
    }
}

fn config_for(format: OutputFormat) -> PlanConfig {
    PlanConfig {
        request: sample_request(),
        service_url: "http://localhost:8000".to_owned(),
        timeout: Duration::from_secs(30),
        format,
    }
}

#[rstest]
#[case::current(ARG_PLAN_CURRENT, ENV_PLAN_CURRENT)]
#[case::pickup(ARG_PLAN_PICKUP, ENV_PLAN_PICKUP)]
#[case::dropoff(ARG_PLAN_DROPOFF, ENV_PLAN_DROPOFF)]
#[case::cycle_used(ARG_PLAN_CYCLE_USED, ENV_PLAN_CYCLE_USED)]
fn converting_without_required_fields_errors(
    complete_args: PlanArgs,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let mut args = complete_args;
    match field {
        ARG_PLAN_CURRENT => args.current = None,
        ARG_PLAN_PICKUP => args.pickup = None,
        ARG_PLAN_DROPOFF => args.dropoff = None,
        _ => args.cycle_used = None,
    }

    let err = PlanConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_applies_defaults(complete_args: PlanArgs) {
    let config = PlanConfig::try_from(complete_args).expect("config should build");
    assert_eq!(config.request, sample_request());
    assert_eq!(config.service_url, "http://localhost:8000");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.format, OutputFormat::Text);
}

#[rstest]
fn plan_config_keeps_overrides(complete_args: PlanArgs) {
    let args = PlanArgs {
        service_url: Some("http://planner.internal:9000".to_owned()),
        timeout_secs: Some(5),
        format: Some(OutputFormat::Json),
        ..complete_args
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.service_url, "http://planner.internal:9000");
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.format, OutputFormat::Json);
}

#[rstest]
#[case(-1.0)]
#[case(70.5)]
fn plan_config_rejects_cycle_out_of_range(complete_args: PlanArgs, #[case] hours: f64) {
    let args = PlanArgs {
        cycle_used: Some(hours),
        ..complete_args
    };
    let err = PlanConfig::try_from(args).expect_err("cycle out of range");
    match err {
        CliError::InvalidTripRequest(TripRequestError::CycleUsedOutOfRange { .. }) => {}
        other => panic!("expected InvalidTripRequest, found {other:?}"),
    }
}

#[rstest]
fn plan_config_rejects_blank_location(complete_args: PlanArgs) {
    let args = PlanArgs {
        pickup: Some("   ".to_owned()),
        ..complete_args
    };
    let err = PlanConfig::try_from(args).expect_err("blank pickup");
    assert!(matches!(
        err,
        CliError::InvalidTripRequest(TripRequestError::BlankLocation { .. })
    ));
}

#[rstest]
fn request_file_fills_unset_fields() {
    let workspace = Workspace::new();
    let request_path = workspace.path("trip.json");
    write_utf8(
        &request_path,
        br#"{
            "currentLocation": "Chicago, IL",
            "pickupLocation": "St. Louis, MO",
            "dropoffLocation": "Dallas, TX",
            "currentCycleUsed": 10.0
        }"#,
    );
    let args = PlanArgs {
        request_path: Some(request_path),
        dropoff: Some("Houston, TX".to_owned()),
        ..PlanArgs::default()
    };

    let merged = args.with_request_file().expect("request file loads");
    let config = PlanConfig::try_from(merged).expect("config should build");

    assert_eq!(config.request.current_location, "Chicago, IL");
    assert_eq!(config.request.dropoff_location, "Houston, TX");
    assert_eq!(config.request.current_cycle_used_hours, 10.0);
}

#[rstest]
fn load_trip_request_reports_missing_file() {
    let workspace = Workspace::new();
    let request_path = workspace.path("absent.json");

    let err = load_trip_request(&request_path).expect_err("missing request should error");
    match err {
        CliError::OpenTripRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("expected OpenTripRequest, found {other:?}"),
    }
}

#[rstest]
fn load_trip_request_reports_invalid_json() {
    let workspace = Workspace::new();
    let request_path = workspace.path("trip.json");
    write_utf8(&request_path, b"{ not valid json");

    let err = load_trip_request(&request_path).expect_err("invalid JSON should error");
    assert!(matches!(err, CliError::ParseTripRequest { .. }));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "cycle_used": "plenty" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "current": "Chicago, IL",
            "pickup": "St. Louis, MO",
            "dropoff": "Dallas, TX",
            "service_url": "http://from-file:8000",
            "cycle_used": 5.0,
        }),
        None,
    );
    composer.push_environment(json!({
        "cycle_used": 30.0,
        "format": "json",
    }));
    composer.push_cli(json!({
        "pickup": "Memphis, TN",
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request.current_location, "Chicago, IL");
    assert_eq!(config.request.pickup_location, "Memphis, TN");
    assert_eq!(config.request.current_cycle_used_hours, 30.0);
    assert_eq!(config.service_url, "http://from-file:8000");
    assert_eq!(config.format, OutputFormat::Json);
}

#[rstest]
fn http_builder_rejects_invalid_service_url() {
    let config = PlanConfig {
        service_url: "not a url".to_owned(),
        ..config_for(OutputFormat::Text)
    };
    let Err(err) = HttpTripPlannerBuilder.build(&config) else {
        panic!("invalid URL should not build a planner");
    };
    match err {
        CliError::BuildTripPlanner { base_url, .. } => assert_eq!(base_url, "not a url"),
        other => panic!("expected BuildTripPlanner, found {other:?}"),
    }
}

#[rstest]
fn execute_plan_draws_route_and_logs() {
    let builder = StubPlannerBuilder::new(Ok(sample_result()));

    let outcome =
        execute_plan(&config_for(OutputFormat::Text), &builder).expect("plan should succeed");

    assert_eq!(outcome.view.day_cards.len(), 2);
    assert!(!outcome.view.estimate.is_pending());
    assert_eq!(outcome.map.markers.len(), 3);
    assert_eq!(outcome.map.route_line.len(), 3);
    assert_eq!(outcome.map.container, "haulplan-map");
}

#[rstest]
#[case::service(
    PlanError::Service { message: "Pickup location not found".to_owned() },
    "Pickup location not found"
)]
#[case::contract(
    PlanError::Contract { reason: "route has 2 points".to_owned() },
    GENERIC_FAILURE_MESSAGE
)]
fn execute_plan_surfaces_banner_text(#[case] error: PlanError, #[case] expected: &str) {
    let builder = StubPlannerBuilder::new(Err(error));

    let err = execute_plan(&config_for(OutputFormat::Text), &builder)
        .expect_err("plan should fail");

    match err {
        CliError::PlanFailed { message } => assert_eq!(message, expected),
        other => panic!("expected PlanFailed, found {other:?}"),
    }
}

#[rstest]
fn draw_failures_keep_their_transition() {
    let session_error = SessionError::Map(RouteDrawError {
        transition: Transition::ResultChanged,
        source: MapSyncError::NotInitialized,
    });

    match CliError::from(session_error) {
        CliError::DrawRoute(draw) => {
            assert_eq!(draw.transition, Transition::ResultChanged);
            assert_eq!(draw.source, MapSyncError::NotInitialized);
        }
        other => panic!("expected DrawRoute, found {other:?}"),
    }
}
