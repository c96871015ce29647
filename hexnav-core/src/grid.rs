//! Hex grid geometry with offset-row coordinates
//!
//! Tiles are addressed by `(col, row)`. Odd rows are shifted right by half a
//! tile width, so the column deltas to a tile's six neighbors depend on the
//! parity of its row while the row deltas do not.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Row delta per direction, identical for both row parities
const ROW_DELTAS: [i32; 6] = [-1, 0, 1, 1, 0, -1];

/// Column deltas for tiles on even rows
/// Index: 0=NE, 1=E, 2=SE, 3=SW, 4=W, 5=NW
const EVEN_ROW_COL_DELTAS: [i32; 6] = [0, 1, 0, -1, -1, -1];

/// Column deltas for tiles on odd rows (shifted right by half a tile)
const ODD_ROW_COL_DELTAS: [i32; 6] = [1, 1, 1, 0, -1, 0];

// ============================================================================
// CORE TYPES
// ============================================================================

/// The six hex directions, in enumeration order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    NorthEast = 0,
    East = 1,
    SouthEast = 2,
    SouthWest = 3,
    West = 4,
    NorthWest = 5,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The direction pointing back the way this one came
    pub fn opposite(self) -> Direction {
        Direction::ALL[(self as usize + 3) % 6]
    }
}

/// Offset grid coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub col: i32,
    pub row: i32,
}

impl TileCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn is_odd_row(&self) -> bool {
        self.row.rem_euclid(2) == 1
    }

    /// Get neighbor in a direction. The result may lie outside any grid.
    pub fn neighbor(&self, direction: Direction) -> TileCoord {
        let d = direction as usize;
        let dc = if self.is_odd_row() {
            ODD_ROW_COL_DELTAS[d]
        } else {
            EVEN_ROW_COL_DELTAS[d]
        };
        TileCoord::new(self.col + dc, self.row + ROW_DELTAS[d])
    }

    /// All six neighbors in direction order
    pub fn neighbors(&self) -> impl Iterator<Item = TileCoord> + '_ {
        Direction::ALL.into_iter().map(move |d| self.neighbor(d))
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

impl FromStr for TileCoord {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self> {
        let parse_err = || NavError::ParseCoord(s.to_string());
        let (col, row) = s.split_once(',').ok_or_else(parse_err)?;
        let col = col.trim().parse().map_err(|_| parse_err())?;
        let row = row.trim().parse().map_err(|_| parse_err())?;
        Ok(TileCoord::new(col, row))
    }
}

/// Linear tile index, `col + row * width`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileIndex(pub usize);

impl TileIndex {
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Continuous world position of a tile center
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// GRID
// ============================================================================

/// Rectangular hex grid dimensions and spacing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    width: i32,
    height: i32,
    tile_size: f32,
}

impl Grid {
    /// Create a grid. Width and height must be positive, tile size positive
    /// and finite.
    pub fn new(width: i32, height: i32, tile_size: f32) -> Result<Self> {
        if width <= 0 || height <= 0 || width.checked_mul(height).is_none() {
            return Err(NavError::InvalidDimensions { width, height });
        }
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(NavError::InvalidTileSize(tile_size));
        }
        Ok(Self {
            width,
            height,
            tile_size,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Distance between tile centers on the same row
    pub fn horizontal_spacing(&self) -> f32 {
        3f32.sqrt() * self.tile_size
    }

    /// Distance between adjacent rows
    pub fn vertical_spacing(&self) -> f32 {
        1.5 * self.tile_size
    }

    /// Check if a coordinate lies on the grid
    pub fn contains(&self, coord: TileCoord) -> bool {
        coord.col >= 0 && coord.row >= 0 && coord.col < self.width && coord.row < self.height
    }

    /// Linear index of a coordinate.
    ///
    /// # Panics
    /// If `coord` is not on the grid.
    pub fn index_of(&self, coord: TileCoord) -> TileIndex {
        assert!(
            self.contains(coord),
            "coordinate {coord} is outside the {}x{} grid",
            self.width,
            self.height
        );
        TileIndex(coord.col as usize + coord.row as usize * self.width as usize)
    }

    pub fn try_index_of(&self, coord: TileCoord) -> Result<TileIndex> {
        if self.contains(coord) {
            Ok(self.index_of(coord))
        } else {
            Err(NavError::InvalidCoordinate {
                coord,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Coordinate of a linear index.
    ///
    /// # Panics
    /// If `index` is not below the tile count.
    pub fn coord_of(&self, index: TileIndex) -> TileCoord {
        assert!(
            index.0 < self.tile_count(),
            "tile index {index} is outside a grid of {} tiles",
            self.tile_count()
        );
        let width = self.width as usize;
        TileCoord::new((index.0 % width) as i32, (index.0 / width) as i32)
    }

    pub fn try_coord_of(&self, index: TileIndex) -> Result<TileCoord> {
        if index.0 < self.tile_count() {
            Ok(self.coord_of(index))
        } else {
            Err(NavError::InvalidIndex {
                index,
                tile_count: self.tile_count(),
            })
        }
    }

    /// All coordinates in row-major order
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |row| (0..width).map(move |col| TileCoord::new(col, row)))
    }

    /// World position of a tile center.
    ///
    /// # Panics
    /// If `coord` is not on the grid.
    pub fn to_world(&self, coord: TileCoord) -> WorldPos {
        assert!(
            self.contains(coord),
            "coordinate {coord} is outside the {}x{} grid",
            self.width,
            self.height
        );
        let horiz = self.horizontal_spacing();
        let row_offset = if coord.is_odd_row() { horiz * 0.5 } else { 0.0 };
        WorldPos::new(
            coord.col as f32 * horiz + row_offset,
            coord.row as f32 * self.vertical_spacing(),
        )
    }

    pub fn index_to_world(&self, index: TileIndex) -> WorldPos {
        self.to_world(self.coord_of(index))
    }

    /// Tile under a world position, or `None` when the position is off the
    /// grid.
    ///
    /// This is an algebraic approximation: the row comes from the vertical
    /// spacing alone, then the row's horizontal offset is undone to get the
    /// column. Tiles are treated as rectangles, so points near the slanted
    /// hexagon edges can resolve to the neighboring tile.
    pub fn world_to_coord(&self, pos: WorldPos) -> Option<TileCoord> {
        if !(pos.x.is_finite() && pos.y.is_finite()) {
            return None;
        }
        let horiz = self.horizontal_spacing();
        let vert = self.vertical_spacing();

        let row = ((pos.y + vert * 0.5) / vert).floor();
        let row_offset = if (row as i64).rem_euclid(2) == 1 { horiz * 0.5 } else { 0.0 };
        let col = ((pos.x - row_offset + horiz * 0.5) / horiz).floor();

        if row < 0.0 || col < 0.0 || row >= self.height as f32 || col >= self.width as f32 {
            return None;
        }
        Some(TileCoord::new(col as i32, row as i32))
    }

    pub fn world_to_index(&self, pos: WorldPos) -> Option<TileIndex> {
        self.world_to_coord(pos).map(|coord| self.index_of(coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: i32, height: i32) -> Grid {
        Grid::new(width, height, 1.0).unwrap()
    }

    #[test]
    fn test_grid_validation() {
        assert!(Grid::new(3, 3, 1.0).is_ok());
        assert_eq!(
            Grid::new(0, 3, 1.0),
            Err(NavError::InvalidDimensions { width: 0, height: 3 })
        );
        assert!(Grid::new(3, -1, 1.0).is_err());
        assert_eq!(Grid::new(3, 3, 0.0), Err(NavError::InvalidTileSize(0.0)));
        assert!(Grid::new(3, 3, f32::NAN).is_err());
    }

    #[test]
    fn test_index_round_trip() {
        let g = grid(7, 9);
        for coord in g.coords() {
            assert_eq!(g.coord_of(g.index_of(coord)), coord);
        }
        for i in 0..g.tile_count() {
            assert_eq!(g.index_of(g.coord_of(TileIndex(i))), TileIndex(i));
        }
        assert_eq!(g.index_of(TileCoord::new(3, 4)), TileIndex(31));
    }

    #[test]
    fn test_checked_conversions() {
        let g = grid(3, 3);
        assert!(matches!(
            g.try_index_of(TileCoord::new(3, 0)),
            Err(NavError::InvalidCoordinate { .. })
        ));
        assert!(g.try_index_of(TileCoord::new(-1, 0)).is_err());
        assert!(matches!(
            g.try_coord_of(TileIndex(9)),
            Err(NavError::InvalidIndex { .. })
        ));
        assert_eq!(g.try_coord_of(TileIndex(8)), Ok(TileCoord::new(2, 2)));
    }

    #[test]
    #[should_panic]
    fn test_index_of_out_of_bounds_panics() {
        grid(3, 3).index_of(TileCoord::new(0, 3));
    }

    #[test]
    fn test_neighbor_tables() {
        let even = TileCoord::new(2, 2);
        let odd = TileCoord::new(2, 3);
        let even_expected = [(2, 1), (3, 2), (2, 3), (1, 3), (1, 2), (1, 1)];
        let odd_expected = [(3, 2), (3, 3), (3, 4), (2, 4), (1, 3), (2, 2)];
        for (i, d) in Direction::ALL.into_iter().enumerate() {
            assert_eq!(even.neighbor(d), TileCoord::new(even_expected[i].0, even_expected[i].1));
            assert_eq!(odd.neighbor(d), TileCoord::new(odd_expected[i].0, odd_expected[i].1));
        }
    }

    #[test]
    fn test_neighbor_reciprocal() {
        for coord in grid(4, 4).coords() {
            for d in Direction::ALL {
                assert_eq!(coord.neighbor(d).neighbor(d.opposite()), coord);
            }
        }
    }

    #[test]
    fn test_world_positions() {
        let g = Grid::new(7, 9, 115.0).unwrap();
        let horiz = 3f32.sqrt() * 115.0;
        assert_eq!(g.to_world(TileCoord::new(0, 0)), WorldPos::new(0.0, 0.0));
        assert_eq!(g.to_world(TileCoord::new(2, 0)), WorldPos::new(2.0 * horiz, 0.0));
        let odd = g.to_world(TileCoord::new(1, 1));
        assert!((odd.x - 1.5 * horiz).abs() < 1e-3);
        assert!((odd.y - 172.5).abs() < 1e-3);
    }

    #[test]
    fn test_world_to_coord_centers() {
        let g = Grid::new(7, 9, 115.0).unwrap();
        for coord in g.coords() {
            assert_eq!(g.world_to_coord(g.to_world(coord)), Some(coord));
        }
    }

    #[test]
    fn test_world_to_coord_off_grid() {
        let g = grid(3, 3);
        assert_eq!(g.world_to_coord(WorldPos::new(-5.0, 0.0)), None);
        assert_eq!(g.world_to_coord(WorldPos::new(0.0, 100.0)), None);
        assert_eq!(g.world_to_coord(WorldPos::new(f32::NAN, 0.0)), None);
    }

    #[test]
    fn test_world_to_coord_is_approximate_near_edges() {
        // Geometrically inside tile (0,1), past the lower-right edge of (0,0),
        // but within (0,0)'s rectangular cell.
        let g = grid(3, 3);
        assert_eq!(g.world_to_coord(WorldPos::new(0.8227, 0.7)), Some(TileCoord::new(0, 0)));
    }

    #[test]
    fn test_coord_parse() {
        assert_eq!("3,4".parse::<TileCoord>(), Ok(TileCoord::new(3, 4)));
        assert_eq!(" 1 , 2 ".parse::<TileCoord>(), Ok(TileCoord::new(1, 2)));
        assert!("3".parse::<TileCoord>().is_err());
        assert!("a,b".parse::<TileCoord>().is_err());
        assert_eq!(TileCoord::new(5, 6).to_string(), "5,6");
    }
}
