//! HEXNAV Core - Hex grid navigation
//!
//! This crate turns a rectangular hex tile map into a traversable graph and
//! answers shortest-hop queries:
//! - Grid geometry (offset-row coordinates, indices, world positions)
//! - Adjacency graph built once per map from an obstacle predicate
//! - Breadth-first flow fields, full or with early exit at a destination
//! - Path and distance reconstruction from a flow field
//! - Map configuration loaded from JSON

pub mod adjacency;
pub mod config;
pub mod error;
pub mod flow;
pub mod grid;
pub mod path;

// Re-exports for convenient access
pub use adjacency::{AdjacencyGraph, GraphId, NeighborSlot, MAX_NEIGHBORS};
pub use config::MapConfig;
pub use error::{NavError, Result};
pub use flow::{FieldMode, FlowField, PathOutcome, PredecessorEntry};
pub use grid::{Direction, Grid, TileCoord, TileIndex, WorldPos};
pub use path::{Path, PathIter};

/// Create a grid and its adjacency graph. Called once per map load.
pub fn build_grid<F>(
    width: i32,
    height: i32,
    tile_size: f32,
    is_obstacle: F,
) -> Result<(Grid, AdjacencyGraph)>
where
    F: Fn(TileCoord) -> bool,
{
    let grid = Grid::new(width, height, tile_size)?;
    let graph = AdjacencyGraph::build(&grid, is_obstacle);
    Ok((grid, graph))
}

/// Shortest path search from `start`, stopping once `goal` is reached
pub fn find_path(
    graph: &AdjacencyGraph,
    start: TileCoord,
    goal: TileCoord,
) -> Result<(FlowField, PathOutcome)> {
    let grid = graph.grid();
    let start = grid.try_index_of(start)?;
    let goal = grid.try_index_of(goal)?;
    FlowField::generate_for_path(graph, start, goal)
}

/// Flow field covering every tile reachable from `origin`
pub fn generate_full_flow_field(graph: &AdjacencyGraph, origin: TileCoord) -> Result<FlowField> {
    let origin = graph.grid().try_index_of(origin)?;
    FlowField::generate_full(graph, origin)
}

/// Hops from the field's origin to `coord`; `Ok(None)` when unreachable
pub fn distance(field: &FlowField, coord: TileCoord) -> Result<Option<usize>> {
    let index = field.grid().try_index_of(coord)?;
    Ok(field.distance(index))
}

/// Path from `coord` back to the field's origin; `Ok(None)` when unreachable
pub fn reconstruct_path(field: &FlowField, coord: TileCoord) -> Result<Option<Path<'_>>> {
    let index = field.grid().try_index_of(coord)?;
    Ok(field.path_to(index))
}
