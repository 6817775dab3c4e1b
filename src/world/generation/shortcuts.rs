//! Extra openings knocked through a carved maze
//!
//! A perfect maze has one route between any two cells. Opening a few walls
//! that already touch two corridors adds loops without cutting anything off.

use rand::rngs::StdRng;
use rand::Rng;

use crate::world::{Cell, Grid, Position};

/// Try `attempts` random interior cells and open the walls that join at least
/// two corridors. Returns how many cells were opened.
pub fn open_shortcuts(grid: &mut Grid, attempts: u32, rng: &mut StdRng) -> usize {
    if grid.width() < 3 || grid.height() < 3 {
        return 0;
    }

    let mut opened = 0;
    for _ in 0..attempts {
        let pos = Position::new(
            rng.gen_range(1..grid.width() - 1),
            rng.gen_range(1..grid.height() - 1),
        );
        if grid.get(pos) == Some(Cell::Wall) && grid.open_neighbours(pos) >= 2 {
            grid.set(pos, Cell::Path);
            opened += 1;
        }
    }

    if opened > 0 {
        log::debug!("Opened {} shortcut(s) in {} attempts", opened, attempts);
    }
    opened
}
