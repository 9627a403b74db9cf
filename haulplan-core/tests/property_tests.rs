//! Property-based tests for the aggregator, the map controller and the
//! lifecycle staleness guard.
//!
//! # Invariants tested
//!
//! - **Cycle floor:** remaining hours are never negative and reach zero
//!   exactly when used plus trip hours meet the cycle ceiling.
//! - **Layer cardinality:** any number of route applications leaves three
//!   markers, one line and the tile layer.
//! - **Latest wins:** whatever order replies arrive in, only the newest
//!   submission's result is stored.

use haulplan_core::test_support::{sample_labels, sample_request, sample_result_with_distance};
use haulplan_core::{
    CYCLE_LIMIT_HOURS, DayLog, HeadlessMap, MapSyncController, RequestLifecycle, RequestState,
    Route, remaining_cycle_hours, route_point, total_trip_hours,
};
use proptest::prelude::*;

fn route_strategy() -> impl Strategy<Value = Route> {
    let point = (-85.0_f64..85.0, -180.0_f64..180.0).prop_map(|(lat, lng)| route_point(lat, lng));
    (point.clone(), point.clone(), point).prop_map(|(a, b, c)| Route::new(a, b, c))
}

fn day_strategy() -> impl Strategy<Value = DayLog> {
    (1_u32..=8, 0.0_f64..=11.0, 0.0_f64..=5.0).prop_map(|(day, driving, on_duty)| DayLog {
        day,
        total_driving: driving,
        total_on_duty: on_duty,
        ..DayLog::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: remaining hours are floored at zero and hit zero exactly at
    /// the ceiling.
    #[test]
    #[expect(
        clippy::float_arithmetic,
        reason = "property compares against the summed hours"
    )]
    fn remaining_hours_floor(used in 0.0_f64..=70.0, trip in 0.0_f64..=120.0) {
        let remaining = remaining_cycle_hours(used, trip);
        prop_assert!(remaining >= 0.0);
        prop_assert!(remaining <= CYCLE_LIMIT_HOURS);
        prop_assert_eq!(remaining == 0.0, used + trip >= CYCLE_LIMIT_HOURS);
    }

    /// Property: trip hours count only driving and on-duty time.
    #[test]
    #[expect(
        clippy::float_arithmetic,
        reason = "property recomputes the expected sum"
    )]
    fn trip_hours_sum_driving_and_on_duty(logs in prop::collection::vec(day_strategy(), 0..8)) {
        let expected: f64 = logs.iter().map(|day| day.total_driving + day.total_on_duty).sum();
        prop_assert_eq!(total_trip_hours(&logs), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: repeated route applications never accumulate layers.
    #[test]
    fn repeated_routes_keep_layer_cardinality(
        routes in prop::collection::vec(route_strategy(), 1..6),
    ) {
        let mut controller = MapSyncController::new(HeadlessMap::new());
        controller.initialize("trip-map").expect("map initialises");

        for route in &routes {
            controller.apply_route(route, &sample_labels()).expect("route applied");
            prop_assert_eq!(controller.layer_count(), 5);
            prop_assert_eq!(controller.backend().total_layer_count(), 5);
        }

        let id = controller.map_id().expect("map bound");
        let state = controller.backend().map(id).expect("live map");
        let last = routes.last().expect("at least one route");
        let positions: Vec<_> = state.markers().map(|marker| marker.position).collect();
        prop_assert_eq!(positions, last.points().to_vec());
    }

    /// Property: the newest submission's reply is the only one applied.
    #[test]
    fn latest_submission_wins(
        order in (1_usize..6).prop_flat_map(|count| Just((0..count).collect::<Vec<_>>()).prop_shuffle()),
    ) {
        let mut lifecycle = RequestLifecycle::new();
        let tickets: Vec<_> = order.iter().map(|_| lifecycle.submit(&sample_request())).collect();
        let newest = tickets.len().checked_sub(1).expect("at least one submission");

        for &index in &order {
            let distance = f64::from(u32::try_from(index).expect("small index"));
            let ticket = tickets.get(index).expect("ticket for every submission");
            lifecycle.complete(ticket, Ok(sample_result_with_distance(distance)));
        }

        prop_assert_eq!(lifecycle.state(), RequestState::Success);
        let result = lifecycle.result().expect("newest reply stored");
        let expected = f64::from(u32::try_from(newest).expect("small index"));
        prop_assert_eq!(result.total_distance_miles, expected);
    }
}
