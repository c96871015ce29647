//! ASCII rendering of a hex map
//!
//! Each tile is four characters wide; odd rows are indented by two to show
//! the half-tile shift.

use std::fmt::Write;

use hexnav_core::{Grid, TileCoord};

/// Content of one rendered tile
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Blocked,
    Open,
    Unreachable,
    Label(String),
}

impl Cell {
    fn text(&self) -> &str {
        match self {
            Cell::Blocked => "##",
            Cell::Open => "..",
            Cell::Unreachable => "--",
            Cell::Label(label) => label,
        }
    }
}

/// Render every tile of `grid`, one text line per row
pub fn render_map<F>(grid: &Grid, cell: F) -> String
where
    F: Fn(TileCoord) -> Cell,
{
    let mut out = String::new();
    for row in 0..grid.height() {
        if row % 2 == 1 {
            out.push_str("  ");
        }
        for col in 0..grid.width() {
            let _ = write!(out, "{:>3} ", cell(TileCoord::new(col, row)).text());
        }
        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push('\n');
    }
    out
}
