//! Serializes a [`MapDocument`] into a standalone Leaflet page.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Serialize;
use tracing::debug;

use crate::{
    error::{Error, Result},
    render::MapDocument,
};

const LEAFLET_CSS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.css";
const LEAFLET_JS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.js";
const PAGE_STYLE: &str = "html, body { width: 100%; height: 100%; margin: 0; padding: 0; }\n\
                          #map { position: absolute; top: 0; bottom: 0; right: 0; left: 0; }";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    center: [f64; 2],
    zoom: u8,
    zoom_control: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions<'a> {
    attribution: &'a str,
    max_zoom: u8,
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PopupOptions {
    max_width: &'static str,
}

/// Leaflet wants `[lat, lng]`
fn lat_lng(coord: geo_types::Coord) -> [f64; 2] {
    [coord.y, coord.x]
}

/// Stops string contents from closing the surrounding `<script>` element.
fn escape_script(js: &str) -> String {
    js.replace("</", "<\\/")
}

fn script(map: &MapDocument) -> serde_json::Result<String> {
    let mut js = String::new();

    let options = MapOptions {
        center: lat_lng(map.center.into()),
        zoom: map.zoom,
        zoom_control: true,
    };
    js.push_str(&format!(
        "var map = L.map(\"map\", {});\n",
        serde_json::to_string(&options)?
    ));

    let provider = map.tile_layer.provider;
    let tile_options = TileOptions {
        attribution: provider.attribution(),
        max_zoom: provider.max_zoom(),
        name: &map.tile_layer.name,
    };
    js.push_str(&format!(
        "var tile_layer = L.tileLayer({}, {}).addTo(map);\n",
        serde_json::to_string(provider.url())?,
        serde_json::to_string(&tile_options)?
    ));

    let popup_options = serde_json::to_string(&PopupOptions { max_width: "100%" })?;
    for (i, marker) in map.markers.iter().enumerate() {
        js.push_str(&format!(
            "var circle_marker_{i} = L.circleMarker({}, {}).addTo(map);\n",
            serde_json::to_string(&lat_lng(marker.location))?,
            serde_json::to_string(&marker.style)?
        ));
        js.push_str(&format!(
            "circle_marker_{i}.bindPopup({}, {popup_options});\n",
            serde_json::to_string(&marker.popup)?
        ));
    }

    let path: Vec<_> = map.polyline.path.coords().map(|c| lat_lng(*c)).collect();
    js.push_str(&format!(
        "var poly_line = L.polyline({}, {}).addTo(map);\n",
        serde_json::to_string(&path)?,
        serde_json::to_string(&map.polyline.style)?
    ));

    Ok(escape_script(&js))
}

pub fn to_html(map: &MapDocument) -> serde_json::Result<Markup> {
    let script = script(map)?;
    Ok(html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "GPS path map" }
                link rel="stylesheet" href=(LEAFLET_CSS);
                script src=(LEAFLET_JS) {}
                style { (PreEscaped(PAGE_STYLE)) }
            }
            body {
                div id="map" {}
                script { (PreEscaped(script)) }
            }
        }
    })
}

/// Sibling file the page is staged in before it replaces `path`.
fn staging_path(path: &Path) -> PathBuf {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    PathBuf::from(staging)
}

/// Writes the page to `path`, replacing whatever is there.
///
/// The page is written to a sibling file first and renamed over `path`, so a
/// failed write leaves either the previous file or nothing.
pub fn write(map: &MapDocument, path: &Path) -> Result<()> {
    let output_error = |source: io::Error| Error::OutputWrite {
        path: path.to_owned(),
        source,
    };

    let page = to_html(map)
        .map_err(|e| output_error(e.into()))?
        .into_string();

    let staging = staging_path(path);
    if let Err(e) = fs::write(&staging, &page).and_then(|()| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(output_error(e));
    }
    debug!(
        bytes = page.len(),
        path = %path.display(),
        tiles = map.tile_layer.provider.as_ref(),
        "wrote map"
    );

    Ok(())
}
