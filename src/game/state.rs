//! Game session
//!
//! Owns the config and the current level, builds each level from a seed,
//! and moves on to the next, larger maze when a level is finished.

use serde::{Deserialize, Serialize};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::command::Command;
use super::level::{LevelState, LevelStatus, TurnOutcome};
use super::time::Countdown;
use crate::data::{ConfigError, GameConfig};
use crate::entities::CollectibleKind;
use crate::world::{generate, open_shortcuts, place, MazeError};

/// Maximum messages kept in the log
const MAX_MESSAGES: usize = 50;

/// Errors that stop a session from continuing
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("failed to set up level {level}: {source}")]
    LevelSetup {
        level: u32,
        #[source]
        source: MazeError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Whether the session is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Countdown ran out
    GameOver,
    /// Player quit
    Quit,
}

/// Categories for message coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageCategory {
    Item,
    System,
    Warning,
}

/// A message to display in the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMessage {
    pub text: String,
    pub category: MessageCategory,
}

/// Result of [`Game::play_turn`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub outcome: TurnOutcome,
    /// Set when this turn finished a level; holds the bonus awarded
    pub level_bonus: Option<u64>,
    pub phase: GamePhase,
}

/// Counters kept across levels for the profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub levels_completed: u32,
    pub gems_collected: u32,
    pub powers_collected: u32,
    pub turns: u64,
}

/// The running game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    seed: u64,
    level: LevelState,
    phase: GamePhase,
    stats: RunStats,
    messages: Vec<GameMessage>,
}

impl Game {
    /// Start a run. Without a seed one is drawn at random and recorded.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self, GameError> {
        config.validate()?;
        let seed = seed.unwrap_or_else(rand::random);
        log::info!("Starting run with seed {}", seed);

        let level = build_level(&config, seed, 1, config.starting_moves)?;
        let mut game = Self {
            config,
            seed,
            level,
            phase: GamePhase::Playing,
            stats: RunStats::default(),
            messages: Vec::new(),
        };
        game.add_message(
            "Collect every gem, then reach the star!",
            MessageCategory::System,
        );
        Ok(game)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn level(&self) -> &LevelState {
        &self.level
    }

    pub fn level_number(&self) -> u32 {
        self.level.level()
    }

    pub fn score(&self) -> u64 {
        self.level.score()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn messages(&self) -> &[GameMessage] {
        &self.messages
    }

    pub fn add_message(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.messages.push(GameMessage {
            text: text.into(),
            category,
        });
        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    /// Apply one command and handle any level transition it causes
    pub fn play_turn(&mut self, command: &Command) -> Result<TurnReport, GameError> {
        if self.is_over() {
            return Ok(TurnReport {
                outcome: TurnOutcome::Ignored,
                level_bonus: None,
                phase: self.phase,
            });
        }

        let rules = self.config.turn_rules();
        let outcome = self.level.apply(command, &rules);
        self.record_outcome(&outcome);

        let mut level_bonus = None;
        match self.level.status() {
            LevelStatus::AwaitingInput => {}
            LevelStatus::LevelComplete => {
                level_bonus = Some(self.advance_level()?);
            }
            LevelStatus::TimeExpired => {
                log::info!(
                    "Time expired on level {} with score {}",
                    self.level.level(),
                    self.level.score()
                );
                self.add_message("Out of moves!", MessageCategory::Warning);
                self.phase = GamePhase::GameOver;
            }
        }

        Ok(TurnReport {
            outcome,
            level_bonus,
            phase: self.phase,
        })
    }

    fn record_outcome(&mut self, outcome: &TurnOutcome) {
        match outcome {
            TurnOutcome::Moved {
                collected: Some(item),
                ..
            } => {
                self.stats.turns += 1;
                match item.kind {
                    CollectibleKind::Gem => self.stats.gems_collected += 1,
                    CollectibleKind::Power => {
                        self.stats.powers_collected += 1;
                        self.add_message("POWER MODE!", MessageCategory::Item);
                    }
                }
                self.add_message(
                    format!("Picked up a {} (+{})", item.kind.name(), item.value),
                    MessageCategory::Item,
                );
            }
            TurnOutcome::Moved { collected: None, .. } | TurnOutcome::Blocked => {
                self.stats.turns += 1;
            }
            TurnOutcome::Wasted => {
                self.stats.turns += 1;
                self.add_message("Unknown command, a move was wasted", MessageCategory::Warning);
            }
            TurnOutcome::Quit => {
                log::info!("Player quit on level {}", self.level.level());
                self.phase = GamePhase::Quit;
            }
            TurnOutcome::Ignored => {}
        }
    }

    /// Award the time bonus and replace the level with the next one
    fn advance_level(&mut self) -> Result<u64, GameError> {
        let finished = self.level.level();
        let remaining = self.level.moves_left();
        let bonus = remaining as u64 * self.config.completion_bonus_per_move as u64;
        let score = self.level.score().saturating_add(bonus);

        let next = finished + 1;
        let countdown = remaining.saturating_add(self.config.level_time_bonus);
        let level = build_level(&self.config, self.seed, next, countdown)?;
        self.level = level.with_score(score);
        self.stats.levels_completed += 1;

        log::info!(
            "Level {} complete: bonus {}, score {}, next maze {}x{}",
            finished,
            bonus,
            score,
            self.level.grid().width(),
            self.level.grid().height()
        );
        self.add_message(
            format!("Level {} complete! Bonus +{}", finished, bonus),
            MessageCategory::System,
        );
        Ok(bonus)
    }

    /// End the run from outside (e.g. the terminal closed)
    pub fn quit(&mut self) {
        if !self.is_over() {
            self.phase = GamePhase::Quit;
        }
    }

    /// Pick a quit run back up. Timed-out runs stay over.
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Quit {
            self.phase = GamePhase::Playing;
            self.add_message(
                format!("Resumed on level {}", self.level.level()),
                MessageCategory::System,
            );
        }
    }
}

/// Mix a run seed and level number into an independent per-level seed
pub fn derive_level_seed(run_seed: u64, level: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= (level as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

/// Generate the maze and pickups for one level
///
/// Any generation or placement failure aborts setup instead of handing back
/// a half-built level.
pub fn build_level(
    config: &GameConfig,
    run_seed: u64,
    level: u32,
    moves: u32,
) -> Result<LevelState, GameError> {
    let mut rng = StdRng::seed_from_u64(derive_level_seed(run_seed, level));
    let (width, height) = config.dimensions_for_level(level);
    let setup_err = |source| GameError::LevelSetup { level, source };

    let mut grid = generate(width, height, &mut rng).map_err(setup_err)?;
    open_shortcuts(
        &mut grid,
        config.shortcuts_per_level.saturating_mul(level),
        &mut rng,
    );

    let excluded = [grid.start(), grid.exit()];
    let collectibles = place(
        &grid,
        &config.placements_for_level(level),
        &excluded,
        &mut rng,
    )
    .map_err(setup_err)?;

    log::info!(
        "Built level {}: {}x{} maze, {} collectibles",
        level,
        width,
        height,
        collectibles.len()
    );

    Ok(LevelState::new(
        level,
        grid,
        collectibles,
        Countdown::new(moves, config.moves_per_turn),
        config.trail_capacity,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use crate::world::Position;
    use std::collections::{HashSet, VecDeque};

    fn small_config() -> GameConfig {
        GameConfig {
            initial_width: 7,
            initial_height: 7,
            max_width: 11,
            max_height: 9,
            gems_base: 1,
            gems_per_level: 0,
            powers_per_level: 0,
            shortcuts_per_level: 0,
            ..GameConfig::default()
        }
    }

    /// Breadth-first route from `from` to `to` over path cells
    fn route(level: &LevelState, from: Position, to: Position) -> Vec<Direction> {
        let grid = level.grid();
        let mut came_from = std::collections::HashMap::new();
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);
        let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

        while let Some(pos) = queue.pop_front() {
            if pos == to {
                break;
            }
            for direction in directions {
                let (dx, dy) = direction.delta();
                let next = pos.offset(dx, dy);
                if grid.is_walkable(next) && seen.insert(next) {
                    came_from.insert(next, (pos, direction));
                    queue.push_back(next);
                }
            }
        }

        let mut steps = Vec::new();
        let mut cursor = to;
        while cursor != from {
            let (prev, direction) = came_from[&cursor];
            steps.push(direction);
            cursor = prev;
        }
        steps.reverse();
        steps
    }

    fn clear_level(game: &mut Game) -> TurnReport {
        let mut position = game.level().player().position();
        let mut targets: Vec<Position> =
            game.level().collectibles().iter().map(|c| c.position).collect();
        targets.push(game.level().exit());

        let mut last = None;
        for target in targets {
            for direction in route(game.level(), position, target) {
                last = Some(game.play_turn(&Command::Move(direction)).unwrap());
            }
            position = target;
        }
        last.unwrap()
    }

    #[test]
    fn test_same_seed_same_first_level() {
        let a = Game::new(GameConfig::default(), Some(1234)).unwrap();
        let b = Game::new(GameConfig::default(), Some(1234)).unwrap();
        assert_eq!(a.level(), b.level());
        assert_eq!(a.seed(), 1234);
    }

    #[test]
    fn test_first_level_matches_config() {
        let game = Game::new(GameConfig::default(), Some(8)).unwrap();
        let level = game.level();
        assert_eq!(level.level(), 1);
        assert_eq!(level.grid().width(), 25);
        assert_eq!(level.grid().height(), 15);
        assert_eq!(level.gems_remaining(), 6);
        assert_eq!(level.collectibles().len(), 8);
        assert_eq!(level.moves_left(), 600);
        assert_eq!(level.player().position(), level.start());
    }

    #[test]
    fn test_completing_a_level_advances_and_awards_bonus() {
        let mut game = Game::new(small_config(), Some(77)).unwrap();

        let report = clear_level(&mut game);

        let bonus = report.level_bonus.expect("level should be complete");
        assert_eq!(report.phase, GamePhase::Playing);
        assert_eq!(game.level_number(), 2);
        assert_eq!(game.level().grid().width(), 9);
        assert_eq!(game.level().grid().height(), 9);
        assert_eq!(game.level().player().position(), game.level().start());
        assert_eq!(game.level().player().trail_len(), 0);
        assert_eq!(game.stats().levels_completed, 1);
        assert_eq!(game.score(), 10 + bonus);
        assert_eq!(game.level().moves_left() as u64, bonus + 300);
    }

    #[test]
    fn test_size_caps_after_many_levels() {
        let mut game = Game::new(small_config(), Some(5)).unwrap();
        for _ in 0..4 {
            clear_level(&mut game);
        }
        assert_eq!(game.level_number(), 5);
        assert_eq!(game.level().grid().width(), 11);
        assert_eq!(game.level().grid().height(), 9);
    }

    #[test]
    fn test_time_expiry_ends_run() {
        let config = GameConfig {
            starting_moves: 3,
            ..small_config()
        };
        let mut game = Game::new(config, Some(9)).unwrap();
        for _ in 0..3 {
            game.play_turn(&Command::parse("nope")).unwrap();
        }
        assert_eq!(game.phase(), GamePhase::GameOver);

        let report = game.play_turn(&Command::Move(Direction::Right)).unwrap();
        assert_eq!(report.outcome, TurnOutcome::Ignored);
    }

    #[test]
    fn test_quit_ends_run() {
        let mut game = Game::new(small_config(), Some(9)).unwrap();
        let report = game.play_turn(&Command::Quit).unwrap();
        assert_eq!(report.phase, GamePhase::Quit);
        assert!(game.is_over());
    }

    #[test]
    fn test_resume_after_quit() {
        let mut game = Game::new(GameConfig::default(), Some(3)).unwrap();
        game.play_turn(&Command::Quit).unwrap();
        assert!(game.is_over());

        game.resume();
        assert_eq!(game.phase(), GamePhase::Playing);
        let report = game.play_turn(&Command::Unrecognized("?".into())).unwrap();
        assert_eq!(report.outcome, TurnOutcome::Wasted);
    }

    #[test]
    fn test_overfull_level_aborts_setup() {
        let config = GameConfig {
            initial_width: 5,
            initial_height: 5,
            max_width: 5,
            max_height: 5,
            gems_base: 20,
            ..GameConfig::default()
        };
        let err = Game::new(config, Some(1)).unwrap_err();
        assert!(matches!(
            err,
            GameError::LevelSetup {
                level: 1,
                source: MazeError::PlacementUnderflow { .. }
            }
        ));
    }

    #[test]
    fn test_enormous_gem_count_aborts_setup() {
        let config = GameConfig::from_ron("(gems_base: 18446744073709551615)").unwrap();
        let err = Game::new(config, Some(1)).unwrap_err();
        assert!(matches!(
            err,
            GameError::LevelSetup {
                level: 1,
                source: MazeError::PlacementUnderflow { .. }
            }
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            initial_width: 8,
            ..GameConfig::default()
        };
        assert!(matches!(
            Game::new(config, Some(1)).unwrap_err(),
            GameError::Config(_)
        ));
    }

    #[test]
    fn test_level_seed_changes_with_inputs() {
        let baseline = derive_level_seed(99, 2);
        assert_ne!(baseline, derive_level_seed(98, 2));
        assert_ne!(baseline, derive_level_seed(99, 3));
        assert_eq!(baseline, derive_level_seed(99, 2));
    }
}
