//! Role-tagged three-stop routes.
//!
//! Coordinates are WGS84 with `x = longitude` and `y = latitude`. The route
//! always holds exactly `[current, pickup, dropoff]`; other lengths are
//! rejected at construction.

use std::fmt;

use geo::{Coord, LineString, Rect};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `(latitude, longitude)` position stored as a `geo` coordinate.
pub type RoutePoint = Coord<f64>;

/// Build a [`RoutePoint`] from latitude and longitude.
///
/// # Examples
/// ```
/// use haulplan_core::route_point;
///
/// let point = route_point(41.88, -87.63);
/// assert_eq!(point.y, 41.88);
/// assert_eq!(point.x, -87.63);
/// ```
#[must_use]
pub const fn route_point(latitude: f64, longitude: f64) -> RoutePoint {
    Coord {
        x: longitude,
        y: latitude,
    }
}

/// The role a stop plays in a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StopRole {
    /// The driver's present position.
    Current,
    /// Where the load is collected.
    Pickup,
    /// Where the load is delivered.
    Dropoff,
}

impl StopRole {
    /// All roles in route order.
    pub const ALL: [Self; 3] = [Self::Current, Self::Pickup, Self::Dropoff];

    /// Lower-case key used for layer bookkeeping.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Pickup => "pickup",
            Self::Dropoff => "dropoff",
        }
    }

    /// Human-readable title used in marker labels.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Current => "Current Location",
            Self::Pickup => "Pickup Location",
            Self::Dropoff => "Dropoff Location",
        }
    }
}

impl fmt::Display for StopRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Errors returned when building a [`Route`] from a point sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The sequence did not hold exactly three points.
    #[error("route must contain exactly 3 points, found {found}")]
    PointCount {
        /// Number of points supplied.
        found: usize,
    },
}

/// An ordered `[current, pickup, dropoff]` route.
///
/// # Examples
/// ```
/// use haulplan_core::{route_point, Route, StopRole};
///
/// let route = Route::new(
///     route_point(41.88, -87.63),
///     route_point(38.63, -90.20),
///     route_point(32.78, -96.80),
/// );
/// assert_eq!(route.point(StopRole::Pickup).y, 38.63);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    points: [RoutePoint; 3],
}

impl Route {
    /// Construct a route from its three stops.
    #[must_use]
    pub const fn new(current: RoutePoint, pickup: RoutePoint, dropoff: RoutePoint) -> Self {
        Self {
            points: [current, pickup, dropoff],
        }
    }

    /// Coordinate of the stop with the given role.
    #[must_use]
    pub const fn point(&self, role: StopRole) -> RoutePoint {
        let [current, pickup, dropoff] = self.points;
        match role {
            StopRole::Current => current,
            StopRole::Pickup => pickup,
            StopRole::Dropoff => dropoff,
        }
    }

    /// All three points in route order.
    #[must_use]
    pub const fn points(&self) -> &[RoutePoint; 3] {
        &self.points
    }

    /// Iterate stops in order, paired with their roles.
    pub fn stops(&self) -> impl Iterator<Item = (StopRole, RoutePoint)> + '_ {
        StopRole::ALL.into_iter().zip(self.points.iter().copied())
    }

    /// The polyline through all three stops.
    #[must_use]
    pub fn line_string(&self) -> LineString<f64> {
        LineString::from(self.points.to_vec())
    }

    /// Smallest rectangle containing every stop.
    #[must_use]
    pub fn bounds(&self) -> Rect<f64> {
        let [first, rest @ ..] = self.points;
        let (min, max) = rest.iter().fold((first, first), |(min, max), point| {
            (
                Coord {
                    x: min.x.min(point.x),
                    y: min.y.min(point.y),
                },
                Coord {
                    x: max.x.max(point.x),
                    y: max.y.max(point.y),
                },
            )
        });
        Rect::new(min, max)
    }
}

impl TryFrom<Vec<RoutePoint>> for Route {
    type Error = RouteError;

    fn try_from(points: Vec<RoutePoint>) -> Result<Self, Self::Error> {
        let found = points.len();
        let points: [RoutePoint; 3] = points
            .try_into()
            .map_err(|_| RouteError::PointCount { found })?;
        Ok(Self { points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn chicago_to_dallas() -> Route {
        Route::new(
            route_point(41.88, -87.63),
            route_point(38.63, -90.20),
            route_point(32.78, -96.80),
        )
    }

    #[rstest]
    fn stops_preserve_role_order(chicago_to_dallas: Route) {
        let roles: Vec<StopRole> = chicago_to_dallas.stops().map(|(role, _)| role).collect();
        assert_eq!(roles, StopRole::ALL.to_vec());
    }

    #[rstest]
    fn bounds_cover_every_stop(chicago_to_dallas: Route) {
        let bounds = chicago_to_dallas.bounds();
        assert_eq!(bounds.min(), Coord { x: -96.80, y: 32.78 });
        assert_eq!(bounds.max(), Coord { x: -87.63, y: 41.88 });
    }

    #[rstest]
    fn line_string_visits_stops_in_order(chicago_to_dallas: Route) {
        let line = chicago_to_dallas.line_string();
        let coords: Vec<RoutePoint> = line.coords().copied().collect();
        assert_eq!(coords, chicago_to_dallas.points().to_vec());
    }

    #[rstest]
    #[case(0)]
    #[case(2)]
    #[case(4)]
    fn rejects_wrong_point_count(#[case] count: usize) {
        let points = vec![route_point(0.0, 0.0); count];
        let err = Route::try_from(points).expect_err("wrong length");
        assert_eq!(err, RouteError::PointCount { found: count });
    }

    #[rstest]
    fn accepts_three_points(chicago_to_dallas: Route) {
        let route = Route::try_from(chicago_to_dallas.points().to_vec()).expect("three points");
        assert_eq!(route, chicago_to_dallas);
    }
}
