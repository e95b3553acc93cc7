use std::collections::HashMap;

/// Color used for any category that has no palette entry.
pub const FALLBACK_COLOR: &str = "#CCCCCC";

/// Immutable mapping from a category value to a CSS hex color.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: HashMap<String, String>,
    fallback: String,
}

impl Palette {
    pub fn new(colors: HashMap<String, String>) -> Self {
        Self {
            colors,
            fallback: FALLBACK_COLOR.to_string(),
        }
    }

    /// Resolve the color for a category. Missing or unknown categories resolve to the fallback color.
    pub fn color_for(&self, category: Option<&str>) -> &str {
        category
            .and_then(|category| self.colors.get(category))
            .unwrap_or(&self.fallback)
    }

    /// Hamden, CT zoning districts.
    pub fn default_zoning() -> Self {
        Self::from_pairs(&[
            ("R1", "#90EE90"),
            ("R2", "#7CFC00"),
            ("R3", "#66CDAA"),
            ("R4", "#3CB371"),
            ("R5", "#2E8B57"),
            ("T1", "#98FB98"),
            ("T2", "#90EE90"),
            ("T3", "#8FBC8F"),
            ("T3.5", "#7CCC7C"),
            ("T4", "#6CAA6C"),
            ("T5", "#5A995A"),
            ("TG", "#487848"),
            ("NC", "#FFB6C1"),
            ("M", "#FF69B4"),
            ("MIH", "#DDA0DD"),
        ])
    }

    /// Hamden, CT elementary schools.
    pub fn default_school() -> Self {
        Self::from_pairs(&[
            ("Bear Path", "#FF6B6B"),
            ("Church Street", "#4ECDC4"),
            ("Dunbar Hill", "#45B7D1"),
            ("Helen Street", "#FFA07A"),
            ("Ridge Hill", "#98D8C8"),
            ("Shepherd Glen", "#E8A87C"),
            ("Spring Glen", "#F7DC6F"),
            ("West Woods", "#BB8FCE"),
        ])
    }

    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(category, color)| (category.to_string(), color.to_string()))
                .collect(),
        )
    }
}
