//! Cell definitions
//!
//! A maze cell is either solid wall or open path.

use serde::{Deserialize, Serialize};

/// State of a single maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Wall,
    Path,
}

impl Cell {
    pub fn is_walkable(&self) -> bool {
        matches!(self, Cell::Path)
    }

    /// Character used by [`Grid::from_ascii`](super::Grid::from_ascii) and debug dumps
    pub fn layout_char(&self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Path => '.',
        }
    }

    /// Parse a layout character. `#` is a wall; `.` and space are path.
    pub fn from_layout_char(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Cell::Wall),
            '.' | ' ' => Some(Cell::Path),
            _ => None,
        }
    }
}
