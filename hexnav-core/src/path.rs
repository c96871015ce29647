//! Read-only path queries over a flow field

use std::iter::FusedIterator;

use crate::flow::{FlowField, PredecessorEntry};
use crate::grid::TileIndex;

/// Path from a destination back to the field's origin.
///
/// Borrows the field and walks it lazily; `iter` can be called any number of
/// times.
#[derive(Clone, Copy, Debug)]
pub struct Path<'a> {
    field: &'a FlowField,
    destination: TileIndex,
}

impl<'a> Path<'a> {
    pub fn destination(&self) -> TileIndex {
        self.destination
    }

    pub fn origin(&self) -> TileIndex {
        self.field.origin()
    }

    /// Tiles from destination to origin, both inclusive
    pub fn iter(&self) -> PathIter<'a> {
        PathIter {
            field: self.field,
            next: Some(self.destination),
        }
    }

    /// Number of steps, one less than the number of tiles
    pub fn hops(&self) -> usize {
        self.iter().count() - 1
    }

    /// Tiles in walking order, origin first
    pub fn to_vec(&self) -> Vec<TileIndex> {
        let mut tiles: Vec<_> = self.iter().collect();
        tiles.reverse();
        tiles
    }
}

impl<'a> IntoIterator for Path<'a> {
    type Item = TileIndex;
    type IntoIter = PathIter<'a>;

    fn into_iter(self) -> PathIter<'a> {
        self.iter()
    }
}

/// Iterator following predecessor links toward the origin
#[derive(Clone, Debug)]
pub struct PathIter<'a> {
    field: &'a FlowField,
    next: Option<TileIndex>,
}

impl Iterator for PathIter<'_> {
    type Item = TileIndex;

    fn next(&mut self) -> Option<TileIndex> {
        let current = self.next?;
        self.next = match self.field.entry(current) {
            PredecessorEntry::Predecessor(prev) => Some(prev),
            PredecessorEntry::Origin => None,
            // Path construction checks the destination, and every visited
            // tile links to another visited tile.
            PredecessorEntry::Unvisited => unreachable!("path walked into unvisited tile {current}"),
        };
        Some(current)
    }
}

impl FusedIterator for PathIter<'_> {}

impl FlowField {
    /// Path from `destination` back to the origin, or `None` if the
    /// destination was never reached.
    ///
    /// # Panics
    /// If `destination` is not a tile of the field.
    pub fn path_to(&self, destination: TileIndex) -> Option<Path<'_>> {
        self.is_visited(destination).then_some(Path {
            field: self,
            destination,
        })
    }

    /// Hop count from the origin, or `None` if the destination was never
    /// reached.
    pub fn distance(&self, destination: TileIndex) -> Option<usize> {
        self.path_to(destination).map(|path| path.hops())
    }

    /// Hop count of every tile, `None` for unvisited tiles.
    ///
    /// Each predecessor chain is walked only until it meets a tile whose
    /// distance is already known.
    pub fn distances(&self) -> Vec<Option<usize>> {
        let mut distances: Vec<Option<usize>> = vec![None; self.tile_count()];
        let mut chain = Vec::new();

        for start in self.visited() {
            let mut current = start;
            let base = loop {
                if let Some(known) = distances[current.get()] {
                    break known;
                }
                match self.entry(current) {
                    PredecessorEntry::Origin => {
                        distances[current.get()] = Some(0);
                        break 0;
                    }
                    PredecessorEntry::Predecessor(prev) => {
                        chain.push(current);
                        current = prev;
                    }
                    PredecessorEntry::Unvisited => {
                        unreachable!("visited tile {current} links to unvisited tile")
                    }
                }
            };
            for (offset, tile) in chain.drain(..).rev().enumerate() {
                distances[tile.get()] = Some(base + offset + 1);
            }
        }

        distances
    }

    /// Tiles at most `max_hops` from the origin, in index order
    pub fn reachable_within(&self, max_hops: usize) -> Vec<TileIndex> {
        self.distances()
            .into_iter()
            .enumerate()
            .filter_map(|(i, d)| d.filter(|&d| d <= max_hops).map(|_| TileIndex(i)))
            .collect()
    }
}
