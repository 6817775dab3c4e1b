//! Game module - Core game logic and state management

mod command;
mod level;
mod state;
mod time;

pub use command::{Command, Direction};
pub use level::{LevelState, LevelStatus, TurnOutcome, TurnRules};
pub use state::{
    build_level, derive_level_seed, Game, GameError, GameMessage, GamePhase, MessageCategory,
    RunStats, TurnReport,
};
pub use time::Countdown;
