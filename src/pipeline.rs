use std::path::Path;

use tracing::info;

use crate::{center, config::Config, error::Result, gps, html, render};

/// Line printed on stdout once the map is written.
pub fn confirmation(output: &Path) -> String {
    format!(
        "Map saved to {}. Open this file in your browser to see the satellite map.",
        output.display()
    )
}

/// Load, aggregate, render and write. Any failing stage aborts the run before output is written.
pub fn run(config: &Config) -> Result<()> {
    let rows = gps::load(&config.input)?;
    info!(rows = rows.len(), input = %config.input.display(), "loaded GPS log");

    let center = center::mean_center(&rows)?;
    info!(
        latitude = center.latitude,
        longitude = center.longitude,
        "map center"
    );

    let map = render::render(&rows, center, config.view());
    html::write(&map, &config.output)?;
    info!(output = %config.output.display(), "map written");

    Ok(())
}
