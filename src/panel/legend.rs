use std::{collections::BTreeSet, fmt};

use rayon::prelude::*;

use crate::{
    geofile::feature::Feature, map::layer_group::LayerKind, style::resolver::StyleResolver,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

/// One swatch per distinct category value in the dataset, sorted ascending. Features without the
/// category attribute contribute no entry.
pub fn build_legend(features: &[Feature], resolver: &StyleResolver) -> Vec<LegendEntry> {
    let attribute = resolver.kind().category_attribute();
    let categories: BTreeSet<&str> = features
        .par_iter()
        .filter_map(|feature| feature.attribute(attribute))
        .collect();
    categories
        .into_iter()
        .map(|category| LegendEntry {
            label: category.to_string(),
            color: resolver.category_color(Some(category)).to_string(),
        })
        .collect()
}

/// Collapsible legend holding a snapshot of both datasets' categories, taken at load time.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LegendPanel {
    pub zoning: Vec<LegendEntry>,
    pub school: Vec<LegendEntry>,
    pub collapsed: bool,
}

impl LegendPanel {
    pub fn entries(&self, kind: LayerKind) -> &[LegendEntry] {
        match kind {
            LayerKind::Zoning => &self.zoning,
            LayerKind::School => &self.school,
        }
    }

    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
    }
}

impl fmt::Display for LegendPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.collapsed {
            return writeln!(f, "Legend (collapsed)");
        }
        for (kind, title) in [
            (LayerKind::Zoning, "Zoning Districts"),
            (LayerKind::School, "School Districts"),
        ] {
            writeln!(f, "{}", title)?;
            for entry in self.entries(kind) {
                writeln!(f, "  [{}] {}", entry.color, entry.label)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::{build_legend, LegendEntry, LegendPanel};
    use crate::{
        geofile::feature::Feature,
        map::layer_group::LayerKind,
        style::{palette::Palette, resolver::StyleResolver},
    };

    fn features(attribute: &str, values: &[&str]) -> Vec<Feature> {
        values
            .iter()
            .map(|value| Feature {
                geometry: geo::Geometry::Point(geo::Point::new(0.0, 0.0)),
                attributes: Some(HashMap::from([(attribute.to_string(), value.to_string())])),
            })
            .collect()
    }

    fn zoning_resolver() -> StyleResolver {
        StyleResolver::new(LayerKind::Zoning, Palette::default_zoning())
    }

    #[rstest]
    fn test_duplicates_collapse_and_sort() {
        let legend = build_legend(&features("ZONING", &["R1", "NC", "R1"]), &zoning_resolver());
        assert_eq!(
            vec![
                LegendEntry {
                    label: "NC".to_string(),
                    color: "#FFB6C1".to_string()
                },
                LegendEntry {
                    label: "R1".to_string(),
                    color: "#90EE90".to_string()
                },
            ],
            legend
        );
    }

    #[rstest]
    #[case(&["T5", "T3.5", "M", "MIH", "T3", "M"], &["M", "MIH", "T3", "T3.5", "T5"])]
    #[case(&["R2", "r2", "B"], &["B", "R2", "r2"])]
    #[case(&[], &[])]
    fn test_legend_labels_strictly_ascending(#[case] values: &[&str], #[case] expected: &[&str]) {
        let legend = build_legend(&features("ZONING", values), &zoning_resolver());
        let labels: Vec<&str> = legend.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(expected, labels.as_slice());
        assert!(labels.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[rstest]
    fn test_unknown_category_gets_fallback_swatch() {
        let resolver = StyleResolver::new(LayerKind::School, Palette::default_school());
        let legend = build_legend(&features("school_name", &["Hamden Middle"]), &resolver);
        assert_eq!("#CCCCCC", legend[0].color);
    }

    #[rstest]
    fn test_features_missing_category_are_skipped() {
        let mut dataset = features("ZONING", &["R3"]);
        dataset.extend(features("DESCRIPTION", &["Open space"]));
        let legend = build_legend(&dataset, &zoning_resolver());
        assert_eq!(1, legend.len());
    }

    #[rstest]
    fn test_collapsed_panel_hides_entries() {
        let mut panel = LegendPanel {
            zoning: build_legend(&features("ZONING", &["R1"]), &zoning_resolver()),
            ..LegendPanel::default()
        };
        assert!(panel.to_string().contains("[#90EE90] R1"));
        panel.toggle();
        assert_eq!("Legend (collapsed)\n", panel.to_string());
        panel.toggle();
        assert!(!panel.collapsed);
    }
}
