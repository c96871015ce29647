//! Breadth-first flow fields
//!
//! A flow field stores, for every tile, the tile it was first reached from.
//! Since every step costs one hop and the frontier is FIFO, the first
//! discovery of a tile is always along a shortest path.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::adjacency::{AdjacencyGraph, GraphId};
use crate::error::{NavError, Result};
use crate::grid::{Grid, TileIndex};

/// Predecessor entry of a single tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredecessorEntry {
    Unvisited,
    Origin,
    Predecessor(TileIndex),
}

/// How much of the reachable region a field covers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldMode {
    /// Every tile reachable from the origin was visited
    Full,
    /// Traversal stopped once `destination` was dequeued. Tiles discovered
    /// before that point are valid, the rest may read as unvisited.
    Targeted { destination: TileIndex },
}

/// Result of a targeted search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathOutcome {
    Reached { hops: usize },
    Unreachable,
}

impl PathOutcome {
    pub fn is_reached(&self) -> bool {
        matches!(self, PathOutcome::Reached { .. })
    }

    pub fn hops(&self) -> Option<usize> {
        match self {
            PathOutcome::Reached { hops } => Some(*hops),
            PathOutcome::Unreachable => None,
        }
    }
}

/// Predecessor links rooted at one origin tile. Read-only once generated.
#[derive(Clone, Debug)]
pub struct FlowField {
    origin: TileIndex,
    grid: Grid,
    graph: GraphId,
    mode: FieldMode,
    entries: Vec<PredecessorEntry>,
}

impl FlowField {
    /// Visit every tile reachable from `origin`.
    ///
    /// # Panics
    /// If `origin` is not a tile of `graph`.
    pub fn generate_full(graph: &AdjacencyGraph, origin: TileIndex) -> Result<Self> {
        traverse(graph, origin, None)
    }

    /// Search from `origin` until `destination` is dequeued.
    ///
    /// # Panics
    /// If either index is not a tile of `graph`.
    pub fn generate_for_path(
        graph: &AdjacencyGraph,
        origin: TileIndex,
        destination: TileIndex,
    ) -> Result<(Self, PathOutcome)> {
        assert!(
            destination.get() < graph.tile_count(),
            "destination {destination} is outside a graph of {} tiles",
            graph.tile_count()
        );

        let field = if origin == destination {
            Self::origin_only(graph, origin, FieldMode::Targeted { destination })
        } else {
            traverse(graph, origin, Some(destination))?
        };

        let outcome = match field.distance(destination) {
            Some(hops) => PathOutcome::Reached { hops },
            None => PathOutcome::Unreachable,
        };
        Ok((field, outcome))
    }

    fn origin_only(graph: &AdjacencyGraph, origin: TileIndex, mode: FieldMode) -> Self {
        assert!(
            origin.get() < graph.tile_count(),
            "origin {origin} is outside a graph of {} tiles",
            graph.tile_count()
        );
        let mut entries = vec![PredecessorEntry::Unvisited; graph.tile_count()];
        entries[origin.get()] = PredecessorEntry::Origin;
        Self {
            origin,
            grid: *graph.grid(),
            graph: graph.id(),
            mode,
            entries,
        }
    }

    pub fn origin(&self) -> TileIndex {
        self.origin
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mode(&self) -> FieldMode {
        self.mode
    }

    pub fn tile_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, index: TileIndex) -> PredecessorEntry {
        self.entries[index.get()]
    }

    pub fn entries(&self) -> &[PredecessorEntry] {
        &self.entries
    }

    pub fn is_visited(&self, index: TileIndex) -> bool {
        self.entries[index.get()] != PredecessorEntry::Unvisited
    }

    /// All tiles with a predecessor entry, in index order
    pub fn visited(&self) -> impl Iterator<Item = TileIndex> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| **entry != PredecessorEntry::Unvisited)
            .map(|(i, _)| TileIndex(i))
    }

    /// Whether this field was generated against `graph`. A field built from
    /// an earlier graph must be regenerated.
    pub fn is_current_for(&self, graph: &AdjacencyGraph) -> bool {
        self.graph == graph.id()
    }
}

/// Shared traversal core. `stop_at` turns on early exit.
fn traverse(
    graph: &AdjacencyGraph,
    origin: TileIndex,
    stop_at: Option<TileIndex>,
) -> Result<FlowField> {
    let mode = match stop_at {
        Some(destination) => FieldMode::Targeted { destination },
        None => FieldMode::Full,
    };
    let mut field = FlowField::origin_only(graph, origin, mode);
    let tile_count = graph.tile_count();

    let mut frontier = VecDeque::with_capacity(tile_count);
    frontier.push_back(origin);
    let mut dequeued = 0usize;

    while let Some(current) = frontier.pop_front() {
        dequeued += 1;
        if dequeued > tile_count {
            tracing::error!(
                origin = origin.get(),
                dequeued,
                tile_count,
                "traversal overran tile count; adjacency graph is corrupt"
            );
            return Err(NavError::TraversalOverrun {
                origin,
                dequeued,
                tile_count,
            });
        }

        if stop_at == Some(current) {
            tracing::trace!(origin = origin.get(), destination = current.get(), dequeued, "early exit");
            break;
        }

        for next in graph.neighbors(current) {
            let entry = &mut field.entries[next.get()];
            if *entry == PredecessorEntry::Unvisited {
                *entry = PredecessorEntry::Predecessor(current);
                frontier.push_back(next);
            }
        }
    }

    tracing::debug!(origin = origin.get(), ?mode, dequeued, "generated flow field");
    Ok(field)
}
