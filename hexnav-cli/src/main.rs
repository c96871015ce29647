//! HEXNAV CLI - Command-line interface
//!
//! Commands:
//! - path: Shortest path between two tiles
//! - field: Hop distances from one tile to the whole map
//! - locate: Tile under a world position
//! - generate: Write a random map config

mod field_cmd;
mod generate_cmd;
mod path_cmd;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hexnav_core::{MapConfig, WorldPos};

#[derive(Parser)]
#[command(name = "hexnav")]
#[command(about = "HEXNAV hex grid navigation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the shortest path between two tiles
    Path(path_cmd::PathArgs),
    /// Show hop distances from one tile
    Field(field_cmd::FieldArgs),
    /// Find the tile under a world position
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        x: f32,
        #[arg(long, allow_hyphen_values = true)]
        y: f32,
        /// Map config JSON file (built-in map if omitted)
        #[arg(long, value_name = "FILE")]
        map: Option<PathBuf>,
    },
    /// Generate a random map config
    Generate(generate_cmd::GenerateArgs),
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Path(args) => path_cmd::run(args),
        Commands::Field(args) => field_cmd::run(args),
        Commands::Locate { x, y, map } => locate(x, y, map.as_deref()),
        Commands::Generate(args) => generate_cmd::run(args),
    }
}

/// Load a map config, or the built-in map when no file is given
pub(crate) fn load_map(path: Option<&Path>) -> Result<MapConfig> {
    match path {
        Some(path) => MapConfig::load(path)
            .with_context(|| format!("Failed to load map: {}", path.display())),
        None => Ok(MapConfig::default()),
    }
}

fn locate(x: f32, y: f32, map: Option<&Path>) -> Result<()> {
    let config = load_map(map)?;
    let grid = config.grid()?;
    let pos = WorldPos::new(x, y);

    match grid.world_to_coord(pos) {
        Some(coord) => {
            let center = grid.to_world(coord);
            println!(
                "({x}, {y}) -> tile {coord} (index {}, center {:.1}, {:.1})",
                grid.index_of(coord).get(),
                center.x,
                center.y
            );
        }
        None => println!("({x}, {y}) is outside the {}x{} map", grid.width(), grid.height()),
    }
    Ok(())
}
