use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{
    render::{MapView, TileLayer, DEFAULT_LAYER_NAME, DEFAULT_ZOOM},
    tiles::TileProvider,
};

pub const DEFAULT_INPUT: &str = "GPSLOG.CSV";
pub const DEFAULT_OUTPUT: &str = "gps_path_map.html";

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,

    pub zoom_start: u8,
    pub tiles: TileProvider,
    // label of the base layer, kept in the layer options
    pub layer_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            zoom_start: DEFAULT_ZOOM,
            tiles: TileProvider::default(),
            layer_name: DEFAULT_LAYER_NAME.to_owned(),
        }
    }
}

impl Config {
    pub fn view(&self) -> MapView {
        MapView {
            zoom: self.zoom_start,
            tile_layer: TileLayer {
                provider: self.tiles,
                name: self.layer_name.clone(),
            },
        }
    }
}

pub fn load(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path).context("Failed to read config")?;
    let config = toml::from_str(&data).context("Failed to parse config")?;
    Ok(config)
}
