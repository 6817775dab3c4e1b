//! Level state and turn processing
//!
//! A level is a maze, the pickups on it, the player, and the countdown.
//! [`LevelState::apply`] is the whole turn machine: it moves the player,
//! collects pickups, spends time, and decides whether the level is over.

use serde::{Deserialize, Serialize};

use super::command::{Command, Direction};
use super::time::Countdown;
use crate::entities::{Collectible, CollectibleKind, Player};
use crate::world::{Grid, Position};

/// Where a level is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelStatus {
    AwaitingInput,
    /// Player stands on the exit with every gem collected
    LevelComplete,
    /// Countdown hit zero
    TimeExpired,
}

impl LevelStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LevelStatus::AwaitingInput)
    }
}

/// Pickup effects that come from config rather than the collectible itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnRules {
    /// Moves added to the countdown by a power-up
    pub power_bonus_moves: u32,
    /// Turns of power mode granted by a power-up
    pub power_mode_moves: u32,
}

/// What happened during one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Moved {
        to: Position,
        collected: Option<Collectible>,
    },
    /// Wall or edge in the way; time still spent
    Blocked,
    /// Unrecognized input; time still spent
    Wasted,
    Quit,
    /// The level was already over
    Ignored,
}

/// Everything about the level in play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    level: u32,
    grid: Grid,
    collectibles: Vec<Collectible>,
    player: Player,
    score: u64,
    countdown: Countdown,
    power_turns: u32,
    turns: u32,
    status: LevelStatus,
}

impl LevelState {
    /// Start a level with the player on the grid's start cell
    pub fn new(
        level: u32,
        grid: Grid,
        collectibles: Vec<Collectible>,
        countdown: Countdown,
        trail_capacity: usize,
    ) -> Self {
        let player = Player::new(grid.start(), trail_capacity);
        let mut state = Self {
            level,
            grid,
            collectibles,
            player,
            score: 0,
            countdown,
            power_turns: 0,
            turns: 0,
            status: LevelStatus::AwaitingInput,
        };
        state.status = state.evaluate();
        state
    }

    /// Carry a running score into this level
    pub fn with_score(mut self, score: u64) -> Self {
        self.score = score;
        self
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Position {
        self.grid.start()
    }

    pub fn exit(&self) -> Position {
        self.grid.exit()
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn collectible_at(&self, pos: Position) -> Option<&Collectible> {
        self.collectibles.iter().find(|c| c.position == pos)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn moves_left(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn power_mode(&self) -> bool {
        self.power_turns > 0
    }

    pub fn power_turns(&self) -> u32 {
        self.power_turns
    }

    /// Turns processed on this level
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    pub fn gems_remaining(&self) -> usize {
        self.collectibles
            .iter()
            .filter(|c| c.kind.is_required())
            .count()
    }

    /// Process one turn
    pub fn apply(&mut self, command: &Command, rules: &TurnRules) -> TurnOutcome {
        if self.status.is_terminal() {
            return TurnOutcome::Ignored;
        }

        let outcome = match command {
            Command::Quit => return TurnOutcome::Quit,
            Command::Move(direction) => self.try_move(*direction, rules),
            Command::Unrecognized(input) => {
                log::debug!("Unrecognized input {:?}, turn spent", input);
                TurnOutcome::Wasted
            }
        };

        self.turns += 1;
        self.countdown.tick();
        self.power_turns = self.power_turns.saturating_sub(1);
        self.status = self.evaluate();

        outcome
    }

    fn try_move(&mut self, direction: Direction, rules: &TurnRules) -> TurnOutcome {
        let (dx, dy) = direction.delta();
        let target = self.player.position().offset(dx, dy);

        if !self.grid.is_walkable(target) {
            return TurnOutcome::Blocked;
        }

        self.player.move_to(target);
        let collected = self.collect_at(target, rules);
        TurnOutcome::Moved {
            to: target,
            collected,
        }
    }

    fn collect_at(&mut self, pos: Position, rules: &TurnRules) -> Option<Collectible> {
        let idx = self.collectibles.iter().position(|c| c.position == pos)?;
        let item = self.collectibles.remove(idx);
        self.add_score(item.value as u64);

        match item.kind {
            CollectibleKind::Gem => {}
            CollectibleKind::Power => {
                self.countdown.add(rules.power_bonus_moves);
                self.power_turns = rules.power_mode_moves;
            }
        }
        Some(item)
    }

    /// Completion wins over expiry when both happen on the same turn
    fn evaluate(&self) -> LevelStatus {
        if self.player.position() == self.exit() && self.gems_remaining() == 0 {
            LevelStatus::LevelComplete
        } else if self.countdown.is_expired() {
            LevelStatus::TimeExpired
        } else {
            LevelStatus::AwaitingInput
        }
    }
}
