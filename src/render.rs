//! Builds the in-memory map: base layer, one marker per sample and the path through them.

use geo_types::{coord, Coord, LineString};
use serde::Serialize;
use tracing::debug;

use crate::{center::CenterPoint, gps::LogRow, tiles::TileProvider};

pub const DEFAULT_ZOOM: u8 = 15;
pub const DEFAULT_LAYER_NAME: &str = "Satellite";

pub const MARKER_STYLE: MarkerStyle = MarkerStyle {
    radius: 4,
    color: "red",
    fill: true,
    fill_color: "red",
};

pub const LINE_STYLE: LineStyle = LineStyle {
    color: "blue",
    weight: 2,
    opacity: 0.8,
};

/// Leaflet options for a circle marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub radius: u32,
    pub color: &'static str,
    pub fill: bool,
    pub fill_color: &'static str,
}

/// Leaflet options for a polyline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub weight: u32,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub provider: TileProvider,
    pub name: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            provider: TileProvider::default(),
            name: DEFAULT_LAYER_NAME.to_owned(),
        }
    }
}

/// Initial view settings that don't depend on the data.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub zoom: u8,
    pub tile_layer: TileLayer,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            tile_layer: TileLayer::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleMarker {
    pub location: Coord,
    pub popup: String,
    pub style: MarkerStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub path: LineString,
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    pub center: CenterPoint,
    pub zoom: u8,
    pub tile_layer: TileLayer,
    pub markers: Vec<CircleMarker>,
    pub polyline: Polyline,
}

impl MapDocument {
    pub fn new(center: CenterPoint, view: MapView) -> Self {
        Self {
            center,
            zoom: view.zoom,
            tile_layer: view.tile_layer,
            markers: Vec::new(),
            polyline: Polyline {
                path: LineString::new(Vec::new()),
                style: LINE_STYLE,
            },
        }
    }

    pub fn add_marker(&mut self, marker: CircleMarker) {
        self.markers.push(marker);
    }

    pub fn set_path(&mut self, path: LineString) {
        self.polyline.path = path;
    }
}

/// Popup label for a sample, e.g. `2024-03-05 14:30:00<br>Speed: 22.57 mph`.
pub fn popup_text(row: &LogRow) -> String {
    format!(
        "{}<br>Speed: {:.2} mph",
        row.timestamp.format("%Y-%m-%d %H:%M:%S"),
        row.speed_mph
    )
}

fn location(row: &LogRow) -> Coord {
    coord! { x: row.longitude, y: row.latitude }
}

pub fn render(rows: &[LogRow], center: CenterPoint, view: MapView) -> MapDocument {
    let mut map = MapDocument::new(center, view);
    for row in rows {
        map.add_marker(CircleMarker {
            location: location(row),
            popup: popup_text(row),
            style: MARKER_STYLE,
        });
    }
    map.set_path(rows.iter().map(location).collect());
    debug!(
        markers = map.markers.len(),
        vertices = map.polyline.path.0.len(),
        "rendered map"
    );

    map
}
