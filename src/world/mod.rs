//! World module
//!
//! Contains the maze grid, cells, and procedural generation.

pub mod cell;
pub mod generation;
pub mod grid;
pub mod placement;
pub mod position;

pub use cell::Cell;
pub use generation::{generate, open_shortcuts};
pub use grid::{Grid, MIN_DIMENSION};
pub use placement::{place, Placement};
pub use position::Position;

/// Errors raised while building a level's maze
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("invalid maze dimensions {width}x{height}: both must be odd and at least 5")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("cannot place {requested} collectibles: only {available} free cells")]
    PlacementUnderflow { requested: usize, available: usize },
    #[error("invalid maze layout: {0}")]
    InvalidLayout(String),
}
