//! Path command - shortest path between two tiles
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 3: collect_route()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use hexnav_core::{find_path, FlowField, Grid, PathOutcome, TileCoord};

use crate::load_map;
use crate::render::{render_map, Cell};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PathArgs {
    /// Start tile as "col,row"
    #[arg(long)]
    pub from: TileCoord,

    /// Goal tile as "col,row"
    #[arg(long)]
    pub to: TileCoord,

    /// Map config JSON file (built-in map if omitted)
    #[arg(long, value_name = "FILE")]
    pub map: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of one search
#[derive(Clone, Debug)]
struct SearchResult {
    from: TileCoord,
    to: TileCoord,
    outcome: PathOutcome,
    route: Vec<TileCoord>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run path command
pub fn run(args: PathArgs) -> Result<()> {
    let config = load_map(args.map.as_deref())?;
    let obstacles = config.obstacle_set();
    let (grid, graph) = config.build()?;

    tracing::info!("Searching {} -> {} on map '{}'", args.from, args.to, config.name);

    let (field, outcome) = find_path(&graph, args.from, args.to)?;
    let result = SearchResult {
        from: args.from,
        to: args.to,
        outcome,
        route: collect_route(&grid, &field, args.to),
    };

    if args.json {
        print_json_result(&result);
    } else {
        print_text_result(&result);
        let on_route = |c: TileCoord| result.route.contains(&c);
        print!(
            "{}",
            render_map(&grid, |c| {
                if obstacles.contains(&c) {
                    Cell::Blocked
                } else if c == result.from {
                    Cell::Label("S".to_string())
                } else if c == result.to {
                    Cell::Label("G".to_string())
                } else if on_route(c) {
                    Cell::Label("*".to_string())
                } else {
                    Cell::Open
                }
            })
        );
    }

    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Route in walking order, empty when unreachable
fn collect_route(grid: &Grid, field: &FlowField, goal: TileCoord) -> Vec<TileCoord> {
    field
        .path_to(grid.index_of(goal))
        .map(|path| path.to_vec().into_iter().map(|i| grid.coord_of(i)).collect())
        .unwrap_or_default()
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Print result as JSON
fn print_json_result(result: &SearchResult) {
    #[derive(serde::Serialize)]
    struct JsonOutput {
        from: TileCoord,
        to: TileCoord,
        reachable: bool,
        hops: Option<usize>,
        route: Vec<TileCoord>,
    }

    let output = JsonOutput {
        from: result.from,
        to: result.to,
        reachable: result.outcome.is_reached(),
        hops: result.outcome.hops(),
        route: result.route.clone(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print result as text
fn print_text_result(result: &SearchResult) {
    match result.outcome {
        PathOutcome::Reached { hops } => {
            let route: Vec<String> = result.route.iter().map(|c| format!("({c})")).collect();
            println!("{} -> {}: {} hops", result.from, result.to, hops);
            println!("{}", route.join(" "));
        }
        PathOutcome::Unreachable => {
            println!("{} -> {}: unreachable", result.from, result.to);
        }
    }
}
