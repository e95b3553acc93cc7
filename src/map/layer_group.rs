use std::{fmt, str::FromStr};

use anyhow::anyhow;
use geo::{BoundingRect, Intersects};

use crate::{geofile::feature::Feature, style::resolver::PathStyle};

/// The two kinds of overlay data shown on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerKind {
    Zoning,
    School,
}

impl LayerKind {
    pub const ALL: [LayerKind; 2] = [LayerKind::Zoning, LayerKind::School];

    /// Name of the feature attribute used to pick the feature's color.
    pub fn category_attribute(&self) -> &'static str {
        match self {
            LayerKind::Zoning => "ZONING",
            LayerKind::School => "school_name",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Zoning => "zoning",
            LayerKind::School => "schools",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "zoning" => Ok(LayerKind::Zoning),
            "schools" | "school" => Ok(LayerKind::School),
            _ => Err(anyhow!("Unknown layer '{}', expected 'zoning' or 'schools'", s)),
        }
    }
}

/// Identifies a rendered feature by its layer kind and its position within that kind's layer group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureId {
    pub kind: LayerKind,
    pub index: usize,
}

/// A feature together with its current rendering style.
#[derive(Debug)]
pub struct RenderedFeature {
    pub feature: Feature,
    pub style: PathStyle,
    pub bounds: Option<geo::Rect>,
}

type FeatureEnvelope = rstar::primitives::GeomWithData<rstar::primitives::Rectangle<[f64; 2]>, usize>;

/// All rendered features of one kind. Shown or hidden as a unit by the map view.
pub struct LayerGroup {
    kind: LayerKind,
    features: Vec<RenderedFeature>,
    rtree: rstar::RTree<FeatureEnvelope>,
}

impl LayerGroup {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            features: Vec::new(),
            rtree: rstar::RTree::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Add a feature with its initial style and return its id.
    pub fn insert(&mut self, feature: Feature, style: PathStyle) -> FeatureId {
        let index = self.features.len();
        let bounds = feature.geometry.bounding_rect();
        if let Some(rect) = bounds {
            let envelope = rstar::primitives::Rectangle::from_corners(
                [rect.min().x, rect.min().y],
                [rect.max().x, rect.max().y],
            );
            self.rtree.insert(FeatureEnvelope::new(envelope, index));
        }
        self.features.push(RenderedFeature {
            feature,
            style,
            bounds,
        });
        FeatureId {
            kind: self.kind,
            index,
        }
    }

    pub fn get(&self, index: usize) -> Option<&RenderedFeature> {
        self.features.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut RenderedFeature> {
        self.features.get_mut(index)
    }

    /// Indices of all features whose geometry contains or touches the point, in insertion order.
    pub fn indices_at(&self, point: &geo::Point) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .rtree
            .locate_all_at_point(&[point.x(), point.y()])
            .map(|envelope| envelope.data)
            .filter(|index| self.features[*index].feature.geometry.intersects(point))
            .collect();
        indices.sort_unstable();
        indices
    }
}
