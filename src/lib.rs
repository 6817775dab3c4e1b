//! Neon Maze - A turn-based terminal maze runner
//!
//! Carve a fresh maze every level, sweep up the gems, and reach the exit
//! before the moves run out.

pub mod data;
pub mod entities;
pub mod game;
pub mod render;
pub mod save;
pub mod ui;
pub mod world;

// Re-export commonly used types
pub use data::GameConfig;
pub use game::{Command, Direction, Game, GamePhase};
pub use world::{Grid, MazeError, Position};
