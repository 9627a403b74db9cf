//! In-memory map widget.
//!
//! `HeadlessMap` keeps every map and layer it is asked to create, which lets
//! terminal front ends describe the map and tests assert on its contents.

use std::collections::BTreeMap;

use geo::Rect;

use super::backend::{
    LayerId, MapBackend, MapBackendError, MapId, MapView, MarkerSpec, PolylineSpec, TileSource,
};

/// A layer held by [`HeadlessMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum HeadlessLayer {
    /// Background tiles.
    Tiles(TileSource),
    /// A stop marker.
    Marker(MarkerSpec),
    /// A route line.
    Polyline(PolylineSpec),
}

/// The viewport requested by the most recent `fit_bounds` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedBounds {
    /// Rectangle to show.
    pub bounds: Rect<f64>,
    /// Padding in pixels.
    pub padding_px: u32,
}

/// State of one headless map.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMapState {
    /// Container the map was created in.
    pub container: String,
    /// Initial view.
    pub view: MapView,
    /// Live layers in insertion order.
    pub layers: BTreeMap<LayerId, HeadlessLayer>,
    /// Latest fitted viewport.
    pub fitted: Option<FittedBounds>,
}

impl HeadlessMapState {
    /// Number of live layers, tiles included.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Live markers.
    pub fn markers(&self) -> impl Iterator<Item = &MarkerSpec> {
        self.layers.values().filter_map(|layer| match layer {
            HeadlessLayer::Marker(marker) => Some(marker),
            _ => None,
        })
    }

    /// Live polylines.
    pub fn polylines(&self) -> impl Iterator<Item = &PolylineSpec> {
        self.layers.values().filter_map(|layer| match layer {
            HeadlessLayer::Polyline(line) => Some(line),
            _ => None,
        })
    }

    /// The polyline stored under `id`, if that layer is a live route line.
    #[must_use]
    pub fn polyline(&self, id: LayerId) -> Option<&PolylineSpec> {
        match self.layers.get(&id) {
            Some(HeadlessLayer::Polyline(line)) => Some(line),
            _ => None,
        }
    }

    /// Live tile layers.
    pub fn tile_layers(&self) -> impl Iterator<Item = &TileSource> {
        self.layers.values().filter_map(|layer| match layer {
            HeadlessLayer::Tiles(tiles) => Some(tiles),
            _ => None,
        })
    }
}

/// A [`MapBackend`] that keeps maps in memory.
#[derive(Debug, Default)]
pub struct HeadlessMap {
    next_id: u64,
    maps: BTreeMap<MapId, HeadlessMapState>,
    created: usize,
    destroyed: usize,
}

impl HeadlessMap {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a live map.
    #[must_use]
    pub fn map(&self, id: MapId) -> Option<&HeadlessMapState> {
        self.maps.get(&id)
    }

    /// Number of maps created over the backend's lifetime.
    #[must_use]
    pub const fn created_count(&self) -> usize {
        self.created
    }

    /// Number of maps destroyed over the backend's lifetime.
    #[must_use]
    pub const fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    /// Layers across all live maps.
    #[must_use]
    pub fn total_layer_count(&self) -> usize {
        self.maps.values().map(HeadlessMapState::layer_count).sum()
    }

    fn allocate(&mut self) -> u64 {
        self.next_id = self.next_id.saturating_add(1);
        self.next_id
    }

    fn insert_layer(&mut self, map: MapId, layer: HeadlessLayer) -> Result<LayerId, MapBackendError> {
        let id = LayerId(self.allocate());
        let state = self
            .maps
            .get_mut(&map)
            .ok_or(MapBackendError::UnknownMap(map))?;
        state.layers.insert(id, layer);
        Ok(id)
    }
}

impl MapBackend for HeadlessMap {
    fn create_map(&mut self, container: &str, view: &MapView) -> Result<MapId, MapBackendError> {
        if container.trim().is_empty() {
            return Err(MapBackendError::Container {
                container: container.to_owned(),
                reason: "container handle is empty".to_owned(),
            });
        }
        let id = MapId(self.allocate());
        self.maps.insert(
            id,
            HeadlessMapState {
                container: container.to_owned(),
                view: *view,
                layers: BTreeMap::new(),
                fitted: None,
            },
        );
        self.created = self.created.saturating_add(1);
        Ok(id)
    }

    fn add_tile_layer(
        &mut self,
        map: MapId,
        tiles: &TileSource,
    ) -> Result<LayerId, MapBackendError> {
        self.insert_layer(map, HeadlessLayer::Tiles(tiles.clone()))
    }

    fn add_marker(&mut self, map: MapId, marker: &MarkerSpec) -> Result<LayerId, MapBackendError> {
        self.insert_layer(map, HeadlessLayer::Marker(marker.clone()))
    }

    fn add_polyline(
        &mut self,
        map: MapId,
        polyline: &PolylineSpec,
    ) -> Result<LayerId, MapBackendError> {
        self.insert_layer(map, HeadlessLayer::Polyline(polyline.clone()))
    }

    fn remove_layer(&mut self, map: MapId, layer: LayerId) {
        if let Some(state) = self.maps.get_mut(&map) {
            state.layers.remove(&layer);
        }
    }

    fn fit_bounds(&mut self, map: MapId, bounds: Rect<f64>, padding_px: u32) {
        if let Some(state) = self.maps.get_mut(&map) {
            state.fitted = Some(FittedBounds { bounds, padding_px });
        }
    }

    fn destroy_map(&mut self, map: MapId) {
        if self.maps.remove(&map).is_some() {
            self.destroyed = self.destroyed.saturating_add(1);
        }
    }
}
