use crate::{geofile::feature::Feature, map::layer_group::LayerKind};

use super::palette::Palette;

/// Rendering style of a polygon or line path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    /// Stroke color.
    pub color: String,
    /// Stroke width in pixels.
    pub weight: f64,
    /// Stroke opacity.
    pub opacity: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
    /// Stroke dash pattern, e.g. "8, 4". Solid when absent.
    pub dash_array: Option<String>,
}

impl PathStyle {
    /// Style of a feature under the pointer: a heavier, fully opaque stroke and a denser fill on top of
    /// the current colors.
    pub fn highlighted(&self) -> Self {
        Self {
            weight: 3.0,
            opacity: 1.0,
            fill_opacity: 0.7,
            ..self.clone()
        }
    }
}

/// Maps a feature's category attribute to its base style, for one layer kind.
#[derive(Debug, Clone)]
pub struct StyleResolver {
    kind: LayerKind,
    palette: Palette,
}

impl StyleResolver {
    pub fn new(kind: LayerKind, palette: Palette) -> Self {
        Self { kind, palette }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Color of a category value in this resolver's palette.
    pub fn category_color(&self, category: Option<&str>) -> &str {
        self.palette.color_for(category)
    }

    pub fn resolve(&self, feature: &Feature) -> PathStyle {
        let color = self
            .category_color(feature.attribute(self.kind.category_attribute()))
            .to_string();
        match self.kind {
            // Low fill opacity keeps the base tiles readable.
            LayerKind::Zoning => PathStyle {
                color: "#333".to_string(),
                weight: 2.0,
                opacity: 0.8,
                fill_color: color,
                fill_opacity: 0.4,
                dash_array: None,
            },
            // School districts show as dashed outlines only.
            LayerKind::School => PathStyle {
                color: color.clone(),
                weight: 3.0,
                opacity: 1.0,
                fill_color: color,
                fill_opacity: 0.05,
                dash_array: Some("8, 4".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::{PathStyle, StyleResolver};
    use crate::{
        geofile::feature::Feature,
        map::layer_group::LayerKind,
        style::palette::{Palette, FALLBACK_COLOR},
    };

    fn feature_with(attribute: &str, value: &str) -> Feature {
        Feature {
            geometry: geo::Geometry::Point(geo::Point::new(0.0, 0.0)),
            attributes: Some(HashMap::from([(attribute.to_string(), value.to_string())])),
        }
    }

    #[rstest]
    fn test_zoning_style() {
        let resolver = StyleResolver::new(LayerKind::Zoning, Palette::default_zoning());
        let style = resolver.resolve(&feature_with("ZONING", "NC"));
        assert_eq!(
            PathStyle {
                color: "#333".to_string(),
                weight: 2.0,
                opacity: 0.8,
                fill_color: "#FFB6C1".to_string(),
                fill_opacity: 0.4,
                dash_array: None,
            },
            style
        );
    }

    #[rstest]
    fn test_school_style_outline_matches_fill() {
        let resolver = StyleResolver::new(LayerKind::School, Palette::default_school());
        let style = resolver.resolve(&feature_with("school_name", "Spring Glen"));
        assert_eq!("#F7DC6F", style.color);
        assert_eq!(style.color, style.fill_color);
        assert_eq!(Some("8, 4".to_string()), style.dash_array);
        assert!(style.fill_opacity < 0.1);
    }

    #[rstest]
    #[case(LayerKind::Zoning, feature_with("ZONING", "Industrial"))]
    #[case(LayerKind::Zoning, feature_with("DESCRIPTION", "no zone code"))]
    #[case(LayerKind::School, feature_with("school_name", "Hamden Hall"))]
    #[case(LayerKind::School, Feature::from(geo::Geometry::Point(geo::Point::new(0.0, 0.0))))]
    fn test_unknown_category_uses_fallback(#[case] kind: LayerKind, #[case] feature: Feature) {
        let palette = match kind {
            LayerKind::Zoning => Palette::default_zoning(),
            LayerKind::School => Palette::default_school(),
        };
        let style = StyleResolver::new(kind, palette).resolve(&feature);
        assert_eq!(FALLBACK_COLOR, style.fill_color);
    }

    #[rstest]
    fn test_injected_palette() {
        let palette = Palette::new(HashMap::from([("R1".to_string(), "#000000".to_string())]));
        let resolver = StyleResolver::new(LayerKind::Zoning, palette);
        assert_eq!("#000000", resolver.resolve(&feature_with("ZONING", "R1")).fill_color);
        assert_eq!(
            FALLBACK_COLOR,
            resolver.resolve(&feature_with("ZONING", "R2")).fill_color
        );
    }

    #[rstest]
    fn test_highlight_keeps_colors() {
        let resolver = StyleResolver::new(LayerKind::School, Palette::default_school());
        let base = resolver.resolve(&feature_with("school_name", "Bear Path"));
        let highlighted = base.highlighted();
        assert_eq!(3.0, highlighted.weight);
        assert_eq!(1.0, highlighted.opacity);
        assert_eq!(0.7, highlighted.fill_opacity);
        assert_eq!(base.color, highlighted.color);
        assert_eq!(base.dash_array, highlighted.dash_array);
    }
}
