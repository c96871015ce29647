//! Field command - hop distances from one tile to the whole map

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use hexnav_core::{generate_full_flow_field, TileCoord};

use crate::load_map;
use crate::render::{render_map, Cell};

#[derive(Args)]
pub struct FieldArgs {
    /// Origin tile as "col,row"
    #[arg(long)]
    pub from: TileCoord,

    /// Only show tiles within this many hops
    #[arg(long)]
    pub max_hops: Option<usize>,

    /// Map config JSON file (built-in map if omitted)
    #[arg(long, value_name = "FILE")]
    pub map: Option<PathBuf>,
}

/// Run field command
pub fn run(args: FieldArgs) -> Result<()> {
    let config = load_map(args.map.as_deref())?;
    let obstacles = config.obstacle_set();
    let (grid, graph) = config.build()?;

    let field = generate_full_flow_field(&graph, args.from)?;
    let distances = field.distances();
    let limit = args.max_hops.unwrap_or(usize::MAX);

    let reachable = distances.iter().flatten().filter(|&&d| d <= limit).count();
    tracing::info!(
        "Flow field from {} on map '{}': {} of {} tiles within reach",
        args.from,
        config.name,
        reachable,
        grid.tile_count()
    );

    print!(
        "{}",
        render_map(&grid, |c| {
            if obstacles.contains(&c) {
                return Cell::Blocked;
            }
            match distances[grid.index_of(c).get()] {
                Some(d) if d <= limit => Cell::Label(d.to_string()),
                Some(_) => Cell::Open,
                None => Cell::Unreachable,
            }
        })
    );
    Ok(())
}
