use std::collections::HashMap;

use crate::{
    geofile::feature::Feature,
    map::{
        layer_group::{FeatureId, LayerKind},
        map_view::MapView,
    },
    panel::{
        info_panel::{render_info_panel, PanelContent},
        legend::{build_legend, LegendPanel},
    },
    style::{palette::Palette, resolver::StyleResolver},
};

use super::hover_state::HoverState;

/// Owns the map and all interaction state. Every user event goes through here, so the hover state has a
/// single writer and the info panel is re-rendered right after each mutation.
pub struct MapController {
    map: MapView,
    hover_state: HoverState,
    hovered: HashMap<LayerKind, FeatureId>,
    zoning_style: StyleResolver,
    school_style: StyleResolver,
    info_panel: PanelContent,
    legend: LegendPanel,
}

impl MapController {
    pub fn new(map: MapView, zoning_palette: Palette, school_palette: Palette) -> Self {
        Self {
            map,
            hover_state: HoverState::default(),
            hovered: HashMap::new(),
            zoning_style: StyleResolver::new(LayerKind::Zoning, zoning_palette),
            school_style: StyleResolver::new(LayerKind::School, school_palette),
            info_panel: PanelContent::prompt(),
            legend: LegendPanel::default(),
        }
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    pub fn hover_state(&self) -> &HoverState {
        &self.hover_state
    }

    pub fn info_panel(&self) -> &PanelContent {
        &self.info_panel
    }

    pub fn legend(&self) -> &LegendPanel {
        &self.legend
    }

    pub fn resolver(&self, kind: LayerKind) -> &StyleResolver {
        match kind {
            LayerKind::Zoning => &self.zoning_style,
            LayerKind::School => &self.school_style,
        }
    }

    /// Style and add all features of a dataset to the layer group of the given kind.
    pub fn add_features(&mut self, kind: LayerKind, features: &[Feature]) -> Vec<FeatureId> {
        let mut ids = Vec::with_capacity(features.len());
        for feature in features {
            let style = self.resolver(kind).resolve(feature);
            ids.push(self.map.add_feature(kind, feature.clone(), style));
        }
        ids
    }

    /// Snapshot both datasets' categories into the legend panel.
    pub fn build_legends(&mut self, zoning: &[Feature], school: &[Feature]) {
        self.legend.zoning = build_legend(zoning, &self.zoning_style);
        self.legend.school = build_legend(school, &self.school_style);
    }

    pub fn toggle_legend(&mut self) {
        self.legend.toggle();
    }

    pub fn hover_enter(&mut self, id: FeatureId) {
        let Some(feature) = self.map.feature(id) else {
            return;
        };
        log::debug!("Hover enter {} feature {}", id.kind, id.index);
        let attributes = feature.attributes.clone();
        if let Some(style) = self.map.style_of(id) {
            let highlighted = style.highlighted();
            self.map.set_style(id, highlighted);
        }
        self.map.bring_to_front(id);
        self.hovered.insert(id.kind, id);
        // A feature without properties leaves the panel as if nothing of its kind was hovered.
        match attributes {
            Some(attributes) => self.hover_state.set(id.kind, attributes),
            None => self.hover_state.clear(id.kind),
        }
        self.refresh_info_panel();
    }

    pub fn hover_exit(&mut self, id: FeatureId) {
        let Some(feature) = self.map.feature(id) else {
            return;
        };
        log::debug!("Hover exit {} feature {}", id.kind, id.index);
        let base_style = self.resolver(id.kind).resolve(feature);
        self.map.set_style(id, base_style);
        if self.hovered.get(&id.kind) == Some(&id) {
            self.hovered.remove(&id.kind);
        }
        self.hover_state.clear(id.kind);
        self.refresh_info_panel();
    }

    /// Frame the viewport to the clicked feature's bounding box.
    pub fn click(&mut self, id: FeatureId) {
        if let Some(bounds) = self.map.bounds_of(id) {
            log::debug!("Fitting bounds to {} feature {}", id.kind, id.index);
            self.map.fit_bounds(bounds);
        }
    }

    /// Translate a pointer position into hover enter/exit events, per layer kind.
    pub fn pointer_move(&mut self, point: geo::Point) {
        for kind in LayerKind::ALL {
            let under_pointer = self.map.feature_at(&point, kind);
            let current = self.hovered.get(&kind).copied();
            if under_pointer == current {
                continue;
            }
            if let Some(current) = current {
                self.hover_exit(current);
            }
            if let Some(under_pointer) = under_pointer {
                self.hover_enter(under_pointer);
            }
        }
    }

    /// The pointer left the map: every hovered feature gets an exit event.
    pub fn pointer_leave(&mut self) {
        for kind in LayerKind::ALL {
            if let Some(current) = self.hovered.get(&kind).copied() {
                self.hover_exit(current);
            }
        }
    }

    /// Click whatever is on top at the point. School outlines are drawn above zoning parcels.
    pub fn click_at(&mut self, point: geo::Point) -> Option<FeatureId> {
        let id = [LayerKind::School, LayerKind::Zoning]
            .into_iter()
            .find_map(|kind| self.map.feature_at(&point, kind))?;
        self.click(id);
        Some(id)
    }

    /// Show or hide a layer group. A hidden group's hovered feature can no longer be under the pointer,
    /// so it is exited, unlike the browser map where hiding a layer fires no mouseout.
    pub fn set_layer_visible(&mut self, kind: LayerKind, checked: bool) {
        if checked {
            self.map.add_layer(kind);
        } else {
            if let Some(current) = self.hovered.get(&kind).copied() {
                self.hover_exit(current);
            }
            self.map.remove_layer(kind);
        }
    }

    pub fn show_load_failure(&mut self) {
        self.info_panel = PanelContent::data_not_found();
    }

    fn refresh_info_panel(&mut self) {
        self.info_panel = render_info_panel(&self.hover_state);
    }
}
