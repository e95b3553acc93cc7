use anyhow::Context;

use super::feature::Feature;

/// Parse a GeoJSON document into features. FeatureCollections, single Features and bare Geometries are
/// accepted. Features without a geometry are skipped.
pub fn read_features_from_geojson_str(contents: &str) -> anyhow::Result<Vec<Feature>> {
    let document: geojson::GeoJson = contents.parse().context("Parsing GeoJSON document")?;
    let geojson_features = match document {
        geojson::GeoJson::FeatureCollection(collection) => collection.features,
        geojson::GeoJson::Feature(feature) => vec![feature],
        geojson::GeoJson::Geometry(geometry) => vec![geojson::Feature::from(geometry)],
    };

    let num_features = geojson_features.len();
    let mut features = Vec::with_capacity(num_features);
    for geojson_feature in geojson_features {
        if geojson_feature.geometry.is_none() {
            continue;
        }
        features.push(Feature::try_from(geojson_feature)?);
    }
    if features.len() != num_features {
        log::warn!(
            "Out of {} features read, only {} had a geometry.",
            num_features,
            features.len()
        )
    }
    Ok(features)
}
