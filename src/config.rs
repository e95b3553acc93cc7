use std::{collections::HashMap, fs::read_to_string, path::Path};

use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::{
    data::source::DataSources,
    map::map_view::{TileLayerConfig, ViewConfig},
    style::palette::Palette,
};

/// Replacement palettes. A missing entry keeps the built-in palette for that layer.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub zoning: Option<HashMap<String, String>>,
    pub schools: Option<HashMap<String, String>>,
}

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub view: ViewConfig,
    pub tiles: TileLayerConfig,
    pub data: DataSources,
    pub palettes: PaletteConfig,
}

impl Config {
    /// Read the config from a YAML file, or use the built-in defaults when no file is given.
    pub fn load(filepath: Option<&Path>) -> anyhow::Result<Self> {
        let Some(filepath) = filepath else {
            return Ok(Self::default());
        };
        if !filepath.exists() {
            return Err(anyhow!("Config file {:?} not found", filepath));
        }
        let config_contents = read_to_string(filepath)?;
        serde_yaml::from_str(&config_contents)
            .with_context(|| format!("Parsing config file {:?}", filepath))
    }

    pub fn zoning_palette(&self) -> Palette {
        self.palettes
            .zoning
            .clone()
            .map(Palette::new)
            .unwrap_or_else(Palette::default_zoning)
    }

    pub fn school_palette(&self) -> Palette {
        self.palettes
            .schools
            .clone()
            .map(Palette::new)
            .unwrap_or_else(Palette::default_school)
    }
}
