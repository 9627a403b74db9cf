//! Keeps a map's layers in step with the latest route.
//!
//! Every route application clears all route layers and rebuilds them, so
//! repeated or redundant applications never accumulate markers or lines.

use std::collections::BTreeMap;

use thiserror::Error;

use super::backend::{
    LayerId, MapBackend, MapBackendError, MapId, MapView, MarkerSpec, PolylineSpec,
    ROUTE_PADDING_PX, TileSource,
};
use crate::{Route, RouteLabels, StopRole};

/// Errors returned by [`MapSyncController`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapSyncError {
    /// A route was applied before the map was initialised.
    #[error("map has not been initialised")]
    NotInitialized,
    /// The map widget rejected an operation.
    #[error(transparent)]
    Backend(#[from] MapBackendError),
}

/// Route layers currently on the map, keyed by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapLayerSet {
    markers: BTreeMap<StopRole, LayerId>,
    route_line: Option<LayerId>,
}

impl MapLayerSet {
    /// Marker layer for a stop role.
    #[must_use]
    pub fn marker(&self, role: StopRole) -> Option<LayerId> {
        self.markers.get(&role).copied()
    }

    /// The route line layer.
    #[must_use]
    pub const fn route_line(&self) -> Option<LayerId> {
        self.route_line
    }

    /// Number of route layers held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len() + usize::from(self.route_line.is_some())
    }

    /// Whether no route layers are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn drain(&mut self) -> impl Iterator<Item = LayerId> + use<> {
        let markers = std::mem::take(&mut self.markers);
        markers.into_values().chain(self.route_line.take())
    }
}

#[derive(Debug)]
struct MapInstance {
    id: MapId,
    tile_layer: LayerId,
    layers: MapLayerSet,
}

/// Owner of a single map widget and its route layers.
///
/// # Examples
/// ```
/// use haulplan_core::{route_point, HeadlessMap, MapSyncController, Route, RouteLabels};
///
/// let mut controller = MapSyncController::new(HeadlessMap::new());
/// controller.initialize("trip-map")?;
///
/// let route = Route::new(
///     route_point(41.88, -87.63),
///     route_point(38.63, -90.20),
///     route_point(32.78, -96.80),
/// );
/// let labels = RouteLabels {
///     current: "Chicago, IL".into(),
///     pickup: "St. Louis, MO".into(),
///     dropoff: "Dallas, TX".into(),
/// };
/// controller.apply_route(&route, &labels)?;
/// controller.apply_route(&route, &labels)?;
///
/// assert_eq!(controller.layers().map(|set| set.len()), Some(4));
/// # Ok::<(), haulplan_core::MapSyncError>(())
/// ```
#[derive(Debug)]
pub struct MapSyncController<B: MapBackend> {
    backend: B,
    tiles: TileSource,
    default_view: MapView,
    instance: Option<MapInstance>,
}

impl<B: MapBackend> MapSyncController<B> {
    /// Create a controller using OpenStreetMap tiles and the default view.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_tiles(backend, TileSource::default())
    }

    /// Create a controller with an explicit tile source.
    #[must_use]
    pub fn with_tiles(backend: B, tiles: TileSource) -> Self {
        Self {
            backend,
            tiles,
            default_view: MapView::default(),
            instance: None,
        }
    }

    /// Bind the map to `container`, attach tiles and show the default view.
    ///
    /// Calling this while already initialised does nothing.
    ///
    /// # Errors
    /// Returns [`MapSyncError::Backend`] when the widget cannot be created or
    /// refuses the tile layer. A refused tile layer destroys the new map, so
    /// the controller stays uninitialised and a later call may retry.
    pub fn initialize(&mut self, container: &str) -> Result<(), MapSyncError> {
        if self.instance.is_some() {
            log::debug!("map already initialised; ignoring initialise for {container:?}");
            return Ok(());
        }
        let id = self.backend.create_map(container, &self.default_view)?;
        let tile_layer = match self.backend.add_tile_layer(id, &self.tiles) {
            Ok(layer) => layer,
            Err(err) => {
                self.backend.destroy_map(id);
                return Err(err.into());
            }
        };
        log::info!("initialised map {id:?} in container {container:?}");
        self.instance = Some(MapInstance {
            id,
            tile_layer,
            layers: MapLayerSet::default(),
        });
        Ok(())
    }

    /// Replace every route layer with markers and a line for `route`.
    ///
    /// Previous markers and the previous line are removed first, then one
    /// marker per stop, one polyline through all stops, and a viewport fit
    /// are applied, on every call.
    ///
    /// # Errors
    /// Returns [`MapSyncError::NotInitialized`] before [`Self::initialize`]
    /// and [`MapSyncError::Backend`] when the widget rejects a layer. Layers
    /// added before a failure stay tracked and are cleared on the next call.
    pub fn apply_route(&mut self, route: &Route, labels: &RouteLabels) -> Result<(), MapSyncError> {
        let instance = self.instance.as_mut().ok_or(MapSyncError::NotInitialized)?;
        let map = instance.id;

        let mut removed = 0_usize;
        for layer in instance.layers.drain() {
            self.backend.remove_layer(map, layer);
            removed += 1;
        }

        for (role, point) in route.stops() {
            let marker = MarkerSpec::for_stop(role, point, labels.get(role));
            let layer = self.backend.add_marker(map, &marker)?;
            instance.layers.markers.insert(role, layer);
        }

        let line = self
            .backend
            .add_polyline(map, &PolylineSpec::route(route.line_string()))?;
        instance.layers.route_line = Some(line);

        self.backend
            .fit_bounds(map, route.bounds(), ROUTE_PADDING_PX);
        log::debug!(
            "rebuilt route layers on map {map:?}: removed {removed}, added {}",
            instance.layers.len()
        );
        Ok(())
    }

    /// Release the map and all owned layers. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        let Some(mut instance) = self.instance.take() else {
            return;
        };
        for layer in instance.layers.drain() {
            self.backend.remove_layer(instance.id, layer);
        }
        self.backend.remove_layer(instance.id, instance.tile_layer);
        self.backend.destroy_map(instance.id);
        log::info!("tore down map {:?}", instance.id);
    }

    /// Whether a map is currently bound.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.instance.is_some()
    }

    /// Identifier of the bound map.
    #[must_use]
    pub fn map_id(&self) -> Option<MapId> {
        self.instance.as_ref().map(|instance| instance.id)
    }

    /// Route layers on the bound map.
    #[must_use]
    pub fn layers(&self) -> Option<&MapLayerSet> {
        self.instance.as_ref().map(|instance| &instance.layers)
    }

    /// Total layers owned, tiles included. Zero when torn down.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.instance
            .as_ref()
            .map_or(0, |instance| instance.layers.len() + 1)
    }

    /// Read access to the widget.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: MapBackend> Drop for MapSyncController<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
