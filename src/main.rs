use std::{io, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod center;
mod config;
mod error;
mod gps;
mod html;
mod pipeline;
mod render;
mod tiles;

/// Convert a GPS log CSV into an interactive satellite map
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML file with conversion settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// GPS log to read [default: GPSLOG.CSV]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// HTML file to write [default: gps_path_map.html]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base layer provider, e.g. Esri.WorldImagery or OpenStreetMap
    #[arg(short, long)]
    tiles: Option<tiles::TileProvider>,

    /// Log each stage to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut config = match cli.config.as_deref() {
        Some(path) => config::load(path)?,
        None => config::Config::default(),
    };
    if let Some(input) = cli.input {
        config.input = input;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(tiles) = cli.tiles {
        config.tiles = tiles;
    }

    pipeline::run(&config)?;

    println!("{}", pipeline::confirmation(&config.output));

    Ok(())
}
