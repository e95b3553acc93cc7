use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::{fs, path::PathBuf};

/// Where a GeoJSON document is read from.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub enum DataSource {
    File { filepath: PathBuf },
    Url { url: String },
}

impl DataSource {
    /// Retrieve the raw document contents.
    pub fn fetch(&self) -> anyhow::Result<String> {
        match self {
            DataSource::File { filepath } => fs::read_to_string(filepath)
                .with_context(|| format!("Reading GeoJSON file {:?}", filepath)),
            DataSource::Url { url } => download_document(url),
        }
    }
}

/// The two GeoJSON documents shown on the map.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DataSources {
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub zoning: DataSource,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub schools: DataSource,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            zoning: DataSource::File {
                filepath: PathBuf::from("data/zoning.geojson"),
            },
            schools: DataSource::File {
                filepath: PathBuf::from("data/schools.geojson"),
            },
        }
    }
}

fn download_document(url: &str) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent("zoning-map")
        .build()?;
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("Request for {} failed with status {}", url, status));
    }
    response.text().or(Err(anyhow!("No response text")))
}
