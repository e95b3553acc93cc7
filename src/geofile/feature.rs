use std::collections::HashMap;

use anyhow::anyhow;

/// Named attributes of a feature. Values are kept as strings, non-string GeoJSON property values are
/// stringified on conversion.
pub type FeatureMap = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: geo::Geometry,
    pub attributes: Option<FeatureMap>,
}

impl Feature {
    /// Look up a single attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .as_ref()
            .and_then(|attributes| attributes.get(name))
            .map(|value| value.as_str())
    }
}

impl From<geo::Geometry> for Feature {
    fn from(value: geo::Geometry) -> Self {
        Self {
            geometry: value,
            attributes: None,
        }
    }
}

impl TryFrom<geojson::Feature> for Feature {
    type Error = anyhow::Error;

    fn try_from(feature: geojson::Feature) -> anyhow::Result<Self> {
        let geometry = feature
            .geometry
            .ok_or_else(|| anyhow!("Feature has no geometry"))?;
        let geometry = geo::Geometry::<f64>::try_from(geometry.value)
            .map_err(|err| anyhow!("Could not convert GeoJSON geometry, {}", err))?;
        let attributes = feature.properties.map(properties_to_feature_map);
        Ok(Self {
            geometry,
            attributes,
        })
    }
}

fn properties_to_feature_map(properties: geojson::JsonObject) -> FeatureMap {
    properties
        .into_iter()
        .filter_map(|(key, value)| match value {
            geojson::JsonValue::Null => None,
            geojson::JsonValue::String(value) => Some((key, value)),
            other => Some((key, other.to_string())),
        })
        .collect()
}
