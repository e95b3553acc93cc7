use anyhow::Context;

use crate::{
    geofile::{feature::Feature, geojson::read_features_from_geojson_str},
    interaction::controller::MapController,
    map::layer_group::LayerKind,
};

use super::source::{DataSource, DataSources};

/// Load the zoning and school documents one after the other, add their layers to the map and build the
/// legends. Any failure replaces the info panel with the "Data Not Found" message. Layers added before
/// the failure stay on the map. Returns whether loading succeeded.
pub fn load_map_data(controller: &mut MapController, sources: &DataSources) -> bool {
    match try_load_map_data(controller, sources) {
        Ok(()) => true,
        Err(err) => {
            log::error!("Error loading map data: {:?}", err);
            controller.show_load_failure();
            false
        }
    }
}

fn try_load_map_data(controller: &mut MapController, sources: &DataSources) -> anyhow::Result<()> {
    let zoning = load_layer(controller, LayerKind::Zoning, &sources.zoning)?;
    let schools = load_layer(controller, LayerKind::School, &sources.schools)?;
    controller.build_legends(&zoning, &schools);
    Ok(())
}

fn load_layer(
    controller: &mut MapController,
    kind: LayerKind,
    source: &DataSource,
) -> anyhow::Result<Vec<Feature>> {
    log::info!("Loading {} data from {:?}", kind, source);
    let contents = source.fetch()?;
    let features = read_features_from_geojson_str(&contents)
        .with_context(|| format!("Reading {} data", kind))?;
    let ids = controller.add_features(kind, &features);
    log::info!("Added {} {} features", ids.len(), kind);
    Ok(features)
}
