//! Procedural maze generation
//!
//! Recursive-backtracking carve, run on an explicit stack so large mazes
//! never recurse.

pub mod shortcuts;

pub use shortcuts::open_shortcuts;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{Cell, Grid, MazeError, Position, MIN_DIMENSION};

/// Carving moves two cells at a time so walls stay between corridors
const CARVE_STEPS: [(i32, i32); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];

/// One pending cell in the depth-first carve
struct CarveFrame {
    cell: Position,
    directions: [(i32, i32); 4],
    next: usize,
}

impl CarveFrame {
    fn new(cell: Position, rng: &mut StdRng) -> Self {
        let mut directions = CARVE_STEPS;
        directions.shuffle(rng);
        Self {
            cell,
            directions,
            next: 0,
        }
    }
}

/// Check that a maze of this size can be carved cleanly
pub fn validate_dimensions(width: i32, height: i32) -> Result<(), MazeError> {
    let valid = |d: i32| d >= MIN_DIMENSION && d % 2 == 1;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(MazeError::InvalidDimensions { width, height })
    }
}

/// Generate a perfect maze of the given size
///
/// Every odd-coordinate interior cell ends up as path and all of them are
/// joined by exactly one route. The outer border is always wall.
pub fn generate(width: i32, height: i32, rng: &mut StdRng) -> Result<Grid, MazeError> {
    validate_dimensions(width, height)?;

    let mut grid = Grid::new(width, height);
    let start = grid.start();
    grid.set(start, Cell::Path);

    let mut stack = vec![CarveFrame::new(start, rng)];
    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.directions.len() {
            stack.pop();
            continue;
        }

        let (dx, dy) = frame.directions[frame.next];
        frame.next += 1;
        let from = frame.cell;
        let target = from.offset(dx, dy);

        if grid.is_interior(target) && grid.get(target) == Some(Cell::Wall) {
            grid.set(from.offset(dx / 2, dy / 2), Cell::Path);
            grid.set(target, Cell::Path);
            stack.push(CarveFrame::new(target, rng));
        }
    }

    log::debug!("Carved {}x{} maze", width, height);
    Ok(grid)
}
