//! The map widget seam and the layer descriptions passed across it.

use geo::{LineString, Rect};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::route::{RoutePoint, StopRole, route_point};

/// Zoom applied before any route has arrived.
pub const DEFAULT_ZOOM: u8 = 4;

/// Viewport padding applied when fitting a route, in pixels.
pub const ROUTE_PADDING_PX: u32 = 50;

/// Identifier of a map instance created by a [`MapBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapId(pub u64);

/// Identifier of a layer added to a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayerId(pub u64);

/// Map centre and zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapView {
    /// Centre of the viewport.
    pub center: RoutePoint,
    /// Zoom level.
    pub zoom: u8,
}

impl Default for MapView {
    /// Continental United States.
    fn default() -> Self {
        Self {
            center: route_point(39.8283, -98.5795),
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Background raster tiles addressed by `(zoom, x, y)`.
///
/// # Examples
/// ```
/// use haulplan_core::TileSource;
///
/// let tiles = TileSource::default();
/// assert_eq!(
///     tiles.tile_url(4, 3, 6),
///     "https://a.tile.openstreetmap.org/4/3/6.png",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileSource {
    /// URL with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
    /// Subdomains substituted for `{s}`.
    pub subdomains: Vec<String>,
    /// Attribution shown on the map.
    pub attribution: String,
}

impl Default for TileSource {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_owned(),
            subdomains: ["a", "b", "c"].map(str::to_owned).to_vec(),
            attribution: "&copy; OpenStreetMap contributors".to_owned(),
        }
    }
}

impl TileSource {
    /// URL of a single tile.
    ///
    /// Subdomains rotate with the tile position so neighbouring tiles spread
    /// across hosts.
    #[must_use]
    pub fn tile_url(&self, zoom: u8, x: u32, y: u32) -> String {
        let position = u64::from(x) + u64::from(y);
        let subdomain = u64::try_from(self.subdomains.len())
            .ok()
            .and_then(|count| position.checked_rem(count))
            .and_then(|slot| usize::try_from(slot).ok())
            .and_then(|index| self.subdomains.get(index))
            .map_or("", String::as_str);
        self.url_template
            .replace("{s}", subdomain)
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

/// Visual style distinguishing one stop role from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MarkerStyle {
    /// Fill colour.
    pub color: &'static str,
    /// Icon name understood by the renderer.
    pub icon: &'static str,
}

impl MarkerStyle {
    /// Style for a stop role.
    #[must_use]
    pub const fn for_role(role: StopRole) -> Self {
        match role {
            StopRole::Current => Self {
                color: "#3b82f6",
                icon: "truck",
            },
            StopRole::Pickup => Self {
                color: "#22c55e",
                icon: "package",
            },
            StopRole::Dropoff => Self {
                color: "#ef4444",
                icon: "flag",
            },
        }
    }
}

/// A marker to place on the map.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MarkerSpec {
    /// Stop the marker represents.
    pub role: StopRole,
    /// Marker position.
    pub position: RoutePoint,
    /// Popup text.
    pub label: String,
    /// Role-specific style.
    pub style: MarkerStyle,
}

impl MarkerSpec {
    /// Marker for a stop, titled with its location name.
    #[must_use]
    pub fn for_stop(role: StopRole, position: RoutePoint, location_name: &str) -> Self {
        Self {
            role,
            position,
            label: format!("{}: {location_name}", role.title()),
            style: MarkerStyle::for_role(role),
        }
    }
}

/// A line drawn through route stops.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PolylineSpec {
    /// Path of the line.
    pub line: LineString<f64>,
    /// Stroke colour.
    pub color: &'static str,
    /// Stroke width in pixels.
    pub weight: u8,
}

impl PolylineSpec {
    /// Default route styling.
    #[must_use]
    pub const fn route(line: LineString<f64>) -> Self {
        Self {
            line,
            color: "#2563eb",
            weight: 4,
        }
    }
}

/// Failures reported by a [`MapBackend`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapBackendError {
    /// The map identifier is not known to the backend.
    #[error("unknown map {0:?}")]
    UnknownMap(MapId),
    /// The container could not host a map.
    #[error("container {container:?} cannot host a map: {reason}")]
    Container {
        /// Container handle.
        container: String,
        /// Backend explanation.
        reason: String,
    },
    /// The backend refused to add a layer.
    #[error("failed to add layer: {0}")]
    Layer(String),
}

/// An interactive map widget.
///
/// The map controller is the only caller; nothing else may add or remove
/// layers on a map it owns.
pub trait MapBackend {
    /// Create a map inside `container` showing `view`.
    ///
    /// # Errors
    /// Returns [`MapBackendError::Container`] when the container is unusable.
    fn create_map(&mut self, container: &str, view: &MapView) -> Result<MapId, MapBackendError>;

    /// Attach background tiles.
    ///
    /// # Errors
    /// Returns an error for an unknown map or a rejected layer.
    fn add_tile_layer(&mut self, map: MapId, tiles: &TileSource)
    -> Result<LayerId, MapBackendError>;

    /// Add a marker.
    ///
    /// # Errors
    /// Returns an error for an unknown map or a rejected layer.
    fn add_marker(&mut self, map: MapId, marker: &MarkerSpec) -> Result<LayerId, MapBackendError>;

    /// Add a polyline.
    ///
    /// # Errors
    /// Returns an error for an unknown map or a rejected layer.
    fn add_polyline(
        &mut self,
        map: MapId,
        polyline: &PolylineSpec,
    ) -> Result<LayerId, MapBackendError>;

    /// Remove a layer. Unknown layers are ignored.
    fn remove_layer(&mut self, map: MapId, layer: LayerId);

    /// Move the viewport to show `bounds` with `padding_px` on every side.
    fn fit_bounds(&mut self, map: MapId, bounds: Rect<f64>, padding_px: u32);

    /// Release the map and everything on it.
    fn destroy_map(&mut self, map: MapId);
}
