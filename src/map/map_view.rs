use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use crate::{geofile::feature::Feature, style::resolver::PathStyle};

use super::layer_group::{FeatureId, LayerGroup, LayerKind};

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Initial map view.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub center: LatLon,
    pub zoom: u8,
}

impl Default for ViewConfig {
    fn default() -> Self {
        // Hamden, CT
        Self {
            center: LatLon {
                lat: 41.3959,
                lon: -72.8968,
            },
            zoom: 13,
        }
    }
}

/// Base tile layer from an external tile provider.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TileLayerConfig {
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl Default for TileLayerConfig {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".to_string(),
            max_zoom: 19,
        }
    }
}

/// The visible area of the map.
#[derive(Debug, Clone, PartialEq)]
pub enum Viewport {
    Centered { center: LatLon, zoom: u8 },
    Bounds(geo::Rect),
}

/// Headless map: owns the layer groups, tracks which of them are active, the per-feature stacking rank and
/// the viewport.
pub struct MapView {
    tile_layer: TileLayerConfig,
    viewport: Viewport,
    groups: HashMap<LayerKind, LayerGroup>,
    active: BTreeSet<LayerKind>,
    // Higher ranks are drawn on top.
    z_ranks: HashMap<FeatureId, u64>,
    next_z_rank: u64,
}

impl MapView {
    /// Create a map with one empty layer group per kind. Both groups start out active.
    pub fn new(view: &ViewConfig, tile_layer: TileLayerConfig) -> Self {
        let zoom = view.zoom.min(tile_layer.max_zoom);
        Self {
            viewport: Viewport::Centered {
                center: view.center,
                zoom,
            },
            tile_layer,
            groups: LayerKind::ALL
                .iter()
                .map(|kind| (*kind, LayerGroup::new(*kind)))
                .collect(),
            active: LayerKind::ALL.into_iter().collect(),
            z_ranks: HashMap::new(),
            next_z_rank: 0,
        }
    }

    pub fn tile_layer(&self) -> &TileLayerConfig {
        &self.tile_layer
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn layer_group(&self, kind: LayerKind) -> &LayerGroup {
        &self.groups[&kind]
    }

    /// Add a feature to its kind's layer group. It is drawn above everything added before.
    pub fn add_feature(&mut self, kind: LayerKind, feature: Feature, style: PathStyle) -> FeatureId {
        let id = self
            .groups
            .entry(kind)
            .or_insert_with(|| LayerGroup::new(kind))
            .insert(feature, style);
        self.raise(id);
        id
    }

    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.groups
            .get(&id.kind)
            .and_then(|group| group.get(id.index))
            .map(|rendered| &rendered.feature)
    }

    pub fn add_layer(&mut self, kind: LayerKind) {
        self.active.insert(kind);
    }

    pub fn remove_layer(&mut self, kind: LayerKind) {
        self.active.remove(&kind);
    }

    pub fn is_layer_active(&self, kind: LayerKind) -> bool {
        self.active.contains(&kind)
    }

    pub fn active_layers(&self) -> &BTreeSet<LayerKind> {
        &self.active
    }

    /// Frame the viewport to exactly the given bounds.
    pub fn fit_bounds(&mut self, bounds: geo::Rect) {
        self.viewport = Viewport::Bounds(bounds);
    }

    pub fn bounds_of(&self, id: FeatureId) -> Option<geo::Rect> {
        self.groups
            .get(&id.kind)
            .and_then(|group| group.get(id.index))
            .and_then(|rendered| rendered.bounds)
    }

    pub fn style_of(&self, id: FeatureId) -> Option<&PathStyle> {
        self.groups
            .get(&id.kind)
            .and_then(|group| group.get(id.index))
            .map(|rendered| &rendered.style)
    }

    pub fn set_style(&mut self, id: FeatureId, style: PathStyle) {
        if let Some(rendered) = self
            .groups
            .get_mut(&id.kind)
            .and_then(|group| group.get_mut(id.index))
        {
            rendered.style = style;
        }
    }

    /// Move a feature to the top of the draw order.
    pub fn bring_to_front(&mut self, id: FeatureId) {
        if self.z_ranks.contains_key(&id) {
            self.raise(id);
        }
    }

    fn raise(&mut self, id: FeatureId) {
        self.z_ranks.insert(id, self.next_z_rank);
        self.next_z_rank += 1;
    }

    pub fn z_rank(&self, id: FeatureId) -> Option<u64> {
        self.z_ranks.get(&id).copied()
    }

    /// The feature drawn above all others.
    pub fn topmost(&self) -> Option<FeatureId> {
        self.z_ranks
            .iter()
            .max_by_key(|(_, rank)| **rank)
            .map(|(id, _)| *id)
    }

    /// The topmost feature of the given kind under the point, if that kind's layer is active.
    pub fn feature_at(&self, point: &geo::Point, kind: LayerKind) -> Option<FeatureId> {
        if !self.is_layer_active(kind) {
            return None;
        }
        self.groups
            .get(&kind)?
            .indices_at(point)
            .into_iter()
            .map(|index| FeatureId { kind, index })
            .max_by_key(|id| self.z_rank(*id))
    }
}
