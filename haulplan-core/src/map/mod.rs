//! Map synchronisation: the widget seam, an in-memory widget and the
//! controller that keeps route layers consistent.

mod backend;
mod controller;
mod headless;

pub use backend::{
    DEFAULT_ZOOM, LayerId, MapBackend, MapBackendError, MapId, MapView, MarkerSpec, MarkerStyle,
    PolylineSpec, ROUTE_PADDING_PX, TileSource,
};
pub use controller::{MapLayerSet, MapSyncController, MapSyncError};
pub use headless::{FittedBounds, HeadlessLayer, HeadlessMap, HeadlessMapState};
