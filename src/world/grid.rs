//! Maze grid data structure
//!
//! The 2D array of walls and paths a level is played on.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::position::Position;
use super::MazeError;

/// Smallest allowed width or height of a maze
pub const MIN_DIMENSION: i32 = 5;

/// A maze grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

/// Unchecked wire form of a grid; validated on the way in
#[derive(Deserialize)]
struct GridData {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl TryFrom<GridData> for Grid {
    type Error = MazeError;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        if data.width <= 0 || data.height <= 0 {
            return Err(MazeError::InvalidLayout(format!(
                "non-positive size {}x{}",
                data.width, data.height
            )));
        }
        let expected = data
            .width
            .checked_mul(data.height)
            .ok_or_else(|| {
                MazeError::InvalidLayout(format!(
                    "size {}x{} is too large",
                    data.width, data.height
                ))
            })? as usize;
        if data.cells.len() != expected {
            return Err(MazeError::InvalidLayout(format!(
                "expected {} cells for {}x{}, found {}",
                expected,
                data.width,
                data.height,
                data.cells.len()
            )));
        }
        Ok(Self {
            width: data.width,
            height: data.height,
            cells: data.cells,
        })
    }
}

impl Grid {
    /// Create a grid filled with walls
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            cells: vec![Cell::Wall; len],
        }
    }

    /// Build a grid from text rows: `#` is a wall, `.` or space is path
    pub fn from_ascii(rows: &[&str]) -> Result<Self, MazeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidLayout("empty layout".to_string()));
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(MazeError::InvalidLayout(format!(
                    "row {} has {} columns, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for ch in row.chars() {
                let cell = Cell::from_layout_char(ch).ok_or_else(|| {
                    MazeError::InvalidLayout(format!("unknown cell '{}' in row {}", ch, y))
                })?;
                cells.push(cell);
            }
        }

        Ok(Self {
            width: width as i32,
            height: height as i32,
            cells,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Where the player enters the maze (carving starts here too)
    pub fn start(&self) -> Position {
        Position::new(1, 1)
    }

    /// The exit cell in the opposite corner
    pub fn exit(&self) -> Position {
        Position::new(self.width - 2, self.height - 2)
    }

    #[inline]
    fn idx(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Check if a position is within bounds
    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Inside the outer border ring
    #[inline]
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.x >= 1 && pos.x < self.width - 1 && pos.y >= 1 && pos.y < self.height - 1
    }

    /// Get cell at position
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[self.idx(pos)])
        } else {
            None
        }
    }

    /// Set cell at position; out-of-bounds writes are ignored
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if self.in_bounds(pos) {
            let idx = self.idx(pos);
            self.cells[idx] = cell;
        }
    }

    /// Check if a position is walkable (out of bounds is not)
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|c| c.is_walkable())
    }

    /// Number of orthogonal neighbours that are open path
    pub fn open_neighbours(&self, pos: Position) -> usize {
        pos.neighbours()
            .iter()
            .filter(|n| self.is_walkable(**n))
            .count()
    }

    /// All path cells, row by row
    pub fn path_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_walkable())
            .map(|(idx, _)| {
                let idx = idx as i32;
                Position::new(idx % self.width, idx / self.width)
            })
            .collect()
    }

    /// Flood fill over path cells from `from`
    pub fn reachable_from(&self, from: Position) -> HashSet<Position> {
        let mut visited = HashSet::new();
        if !self.is_walkable(from) {
            return visited;
        }

        let mut stack = vec![from];
        while let Some(pos) = stack.pop() {
            if !visited.insert(pos) {
                continue;
            }
            for next in pos.neighbours() {
                if self.is_walkable(next) && !visited.contains(&next) {
                    stack.push(next);
                }
            }
        }
        visited
    }

    /// Text dump using layout characters, one line per row
    pub fn to_ascii(&self) -> Vec<String> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|c| c.layout_char()).collect())
            .collect()
    }
}
