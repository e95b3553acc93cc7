use std::fmt;

use crate::{interaction::hover_state::HoverState, map::layer_group::LayerKind};

/// Shown for attributes a feature does not carry.
pub const PLACEHOLDER: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelBody {
    Message(&'static str),
    Rows(Vec<PanelRow>),
}

/// Content of the fixed-location info panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelContent {
    pub title: &'static str,
    pub body: PanelBody,
}

impl PanelContent {
    pub fn prompt() -> Self {
        Self {
            title: "Hover over an area",
            body: PanelBody::Message(
                "Move your cursor over the map to see zoning and school district information.",
            ),
        }
    }

    pub fn data_not_found() -> Self {
        Self {
            title: "Data Not Found",
            body: PanelBody::Message(
                "Please add GeoJSON files to the data/ folder. See README for instructions.",
            ),
        }
    }
}

impl fmt::Display for PanelContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        match &self.body {
            PanelBody::Message(message) => writeln!(f, "{}", message),
            PanelBody::Rows(rows) => {
                for row in rows {
                    writeln!(f, "{}: {}", row.label, row.value)?;
                }
                Ok(())
            }
        }
    }
}

/// Describe the current hover selection. The school block comes before the zoning block.
pub fn render_info_panel(hover_state: &HoverState) -> PanelContent {
    if hover_state.is_empty() {
        return PanelContent::prompt();
    }

    let mut rows = Vec::new();
    if let Some(school) = hover_state.get(LayerKind::School) {
        rows.push(row("Elementary School", school.get("school_name")));
        rows.push(row("School Address", school.get("address")));
    }
    if let Some(zoning) = hover_state.get(LayerKind::Zoning) {
        rows.push(row("Zoning Type", zoning.get("ZONING")));
        rows.push(row("Zoning Description", zoning.get("DESCRIPTION")));
    }
    PanelContent {
        title: "Area Information",
        body: PanelBody::Rows(rows),
    }
}

fn row(label: &'static str, value: Option<&String>) -> PanelRow {
    PanelRow {
        label,
        value: value
            .filter(|value| !value.is_empty())
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
    }
}
