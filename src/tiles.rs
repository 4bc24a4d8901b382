//! Base map imagery providers, named the way Leaflet provider registries name them.

use serde::Deserialize;
use strum::{AsRefStr, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString, Deserialize)]
pub enum TileProvider {
    #[default]
    #[strum(serialize = "Esri.WorldImagery")]
    #[serde(rename = "Esri.WorldImagery")]
    EsriWorldImagery,
    #[strum(serialize = "Esri.WorldStreetMap")]
    #[serde(rename = "Esri.WorldStreetMap")]
    EsriWorldStreetMap,
    #[strum(serialize = "OpenStreetMap")]
    #[serde(rename = "OpenStreetMap")]
    OpenStreetMap,
    #[strum(serialize = "OpenTopoMap")]
    #[serde(rename = "OpenTopoMap")]
    OpenTopoMap,
}

impl TileProvider {
    pub fn url(self) -> &'static str {
        match self {
            TileProvider::EsriWorldImagery => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
            }
            TileProvider::EsriWorldStreetMap => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Street_Map/MapServer/tile/{z}/{y}/{x}"
            }
            TileProvider::OpenStreetMap => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            TileProvider::OpenTopoMap => "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        }
    }

    /// HTML attribution shown in the map corner; providers require it.
    pub fn attribution(self) -> &'static str {
        match self {
            TileProvider::EsriWorldImagery => {
                "Tiles &copy; Esri &mdash; Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, \
                 Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community"
            }
            TileProvider::EsriWorldStreetMap => {
                "Tiles &copy; Esri &mdash; Source: Esri, DeLorme, NAVTEQ, USGS, Intermap, iPC, \
                 NRCAN, Esri Japan, METI, Esri China (Hong Kong), Esri (Thailand), TomTom, 2012"
            }
            TileProvider::OpenStreetMap => {
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            }
            TileProvider::OpenTopoMap => {
                "Map data: &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> \
                 contributors, SRTM | Map style: &copy; <a href=\"https://opentopomap.org\">OpenTopoMap</a> \
                 (CC-BY-SA)"
            }
        }
    }

    pub fn max_zoom(self) -> u8 {
        match self {
            TileProvider::EsriWorldImagery => 18,
            TileProvider::EsriWorldStreetMap => 18,
            TileProvider::OpenStreetMap => 19,
            TileProvider::OpenTopoMap => 17,
        }
    }
}
