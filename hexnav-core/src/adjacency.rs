//! Precomputed tile adjacency
//!
//! Each tile owns six neighbor slots. The first `k` hold the passable
//! neighbors in direction order and the rest are [`NeighborSlot::Empty`];
//! readers stop at the first empty slot. A slot does not correspond to a
//! fixed compass direction.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::grid::{Direction, Grid, TileCoord, TileIndex};

/// Maximum neighbors per tile
pub const MAX_NEIGHBORS: usize = 6;

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// One adjacency slot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeighborSlot {
    #[default]
    Empty,
    Tile(TileIndex),
}

impl NeighborSlot {
    pub fn tile(self) -> Option<TileIndex> {
        match self {
            NeighborSlot::Empty => None,
            NeighborSlot::Tile(index) => Some(index),
        }
    }
}

/// Identity of one built graph. Flow fields remember the id they were
/// generated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GraphId(u64);

/// Immutable neighbor lists for every tile of a grid
#[derive(Clone, Debug)]
pub struct AdjacencyGraph {
    id: GraphId,
    grid: Grid,
    slots: Vec<[NeighborSlot; MAX_NEIGHBORS]>,
}

impl AdjacencyGraph {
    /// Build adjacency for `grid`, treating tiles for which `is_obstacle`
    /// returns true as impassable.
    ///
    /// Obstacle tiles get no edges and are never linked from their
    /// neighbors, so the graph is symmetric over the passable tiles.
    pub fn build<F>(grid: &Grid, is_obstacle: F) -> Self
    where
        F: Fn(TileCoord) -> bool,
    {
        let mut slots = vec![[NeighborSlot::Empty; MAX_NEIGHBORS]; grid.tile_count()];
        let mut edges = 0usize;
        let mut obstacles = 0usize;

        for coord in grid.coords() {
            if is_obstacle(coord) {
                obstacles += 1;
                continue;
            }

            let tile_slots = &mut slots[grid.index_of(coord).get()];
            let mut filled = 0;
            for direction in Direction::ALL {
                let next = coord.neighbor(direction);
                if grid.contains(next) && !is_obstacle(next) {
                    tile_slots[filled] = NeighborSlot::Tile(grid.index_of(next));
                    filled += 1;
                }
            }
            edges += filled;
        }

        let id = GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(
            graph = id.0,
            width = grid.width(),
            height = grid.height(),
            obstacles,
            directed_edges = edges,
            "built adjacency graph"
        );

        Self {
            id,
            grid: *grid,
            slots,
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tile_count(&self) -> usize {
        self.slots.len()
    }

    /// Raw slots of a tile, including trailing empties
    pub fn slots(&self, index: TileIndex) -> &[NeighborSlot; MAX_NEIGHBORS] {
        &self.slots[index.get()]
    }

    /// Neighbors of a tile, stopping at the first empty slot
    pub fn neighbors(&self, index: TileIndex) -> impl Iterator<Item = TileIndex> + '_ {
        self.slots[index.get()].iter().map_while(|slot| slot.tile())
    }

    pub fn degree(&self, index: TileIndex) -> usize {
        self.neighbors(index).count()
    }

    pub fn contains_edge(&self, from: TileIndex, to: TileIndex) -> bool {
        self.neighbors(from).any(|next| next == to)
    }

    /// Number of directed edges (each undirected edge counts twice)
    pub fn edge_count(&self) -> usize {
        (0..self.tile_count()).map(|i| self.degree(TileIndex(i))).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(width: i32, height: i32) -> (Grid, AdjacencyGraph) {
        let grid = Grid::new(width, height, 1.0).unwrap();
        let graph = AdjacencyGraph::build(&grid, |_| false);
        (grid, graph)
    }

    #[test]
    fn test_corner_and_center_degrees() {
        let (grid, graph) = open_grid(3, 3);
        // (0,0) even row: E and SE only
        let corner = grid.index_of(TileCoord::new(0, 0));
        assert_eq!(graph.degree(corner), 2);
        let center = grid.index_of(TileCoord::new(1, 1));
        assert_eq!(graph.degree(center), 6);
    }

    #[test]
    fn test_slots_in_direction_order() {
        let (grid, graph) = open_grid(3, 3);
        let corner = grid.index_of(TileCoord::new(0, 0));
        let expected = [
            NeighborSlot::Tile(grid.index_of(TileCoord::new(1, 0))),
            NeighborSlot::Tile(grid.index_of(TileCoord::new(0, 1))),
            NeighborSlot::Empty,
            NeighborSlot::Empty,
            NeighborSlot::Empty,
            NeighborSlot::Empty,
        ];
        assert_eq!(graph.slots(corner), &expected);
    }

    #[test]
    fn test_obstacle_has_no_edges_and_is_unlinked() {
        let grid = Grid::new(3, 3, 1.0).unwrap();
        let wall = TileCoord::new(1, 1);
        let graph = AdjacencyGraph::build(&grid, |c| c == wall);
        let wall_index = grid.index_of(wall);

        assert_eq!(graph.degree(wall_index), 0);
        for next in wall.neighbors() {
            assert!(!graph.contains_edge(grid.index_of(next), wall_index));
        }
    }

    #[test]
    fn test_single_tile_grid() {
        let (_, graph) = open_grid(1, 1);
        assert_eq!(graph.tile_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_graph_ids_are_unique() {
        let (_, a) = open_grid(2, 2);
        let (_, b) = open_grid(2, 2);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }
}
