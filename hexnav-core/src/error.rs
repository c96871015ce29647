//! Navigation error type

use thiserror::Error;

use crate::grid::{TileCoord, TileIndex};

/// Convenient result alias for the navigation core.
pub type Result<T> = std::result::Result<T, NavError>;

/// Failures surfaced by the navigation core.
///
/// An unreachable destination is not an error: queries report it as `None`
/// or [`crate::PathOutcome::Unreachable`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavError {
    /// Width or height was zero or negative.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// Tile size must be a positive, finite number of world units.
    #[error("invalid tile size {0}")]
    InvalidTileSize(f32),

    /// Coordinate outside `0..width` x `0..height`.
    #[error("coordinate {coord} is outside the {width}x{height} grid")]
    InvalidCoordinate {
        coord: TileCoord,
        width: i32,
        height: i32,
    },

    /// Linear index outside `0..width*height`.
    #[error("tile index {index} is outside a grid of {tile_count} tiles")]
    InvalidIndex { index: TileIndex, tile_count: usize },

    /// The breadth-first traversal dequeued more tiles than exist.
    /// Only a corrupted adjacency graph can cause this.
    #[error("traversal from {origin} dequeued {dequeued} tiles on a grid of {tile_count}")]
    TraversalOverrun {
        origin: TileIndex,
        dequeued: usize,
        tile_count: usize,
    },

    /// Text could not be parsed as `col,row`.
    #[error("cannot parse tile coordinate from {0:?}, expected \"col,row\"")]
    ParseCoord(String),
}
