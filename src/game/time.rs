//! Move-based countdown
//!
//! Time runs down once per processed turn, not by the wall clock. The UI
//! labels it "moves left" for that reason.

use serde::{Deserialize, Serialize};

/// Remaining moves before the level times out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
    per_turn: u32,
}

impl Countdown {
    pub fn new(remaining: u32, per_turn: u32) -> Self {
        Self {
            remaining,
            per_turn,
        }
    }

    /// Spend one turn. Returns true if this tick ran the clock out.
    pub fn tick(&mut self) -> bool {
        let was_running = self.remaining > 0;
        self.remaining = self.remaining.saturating_sub(self.per_turn);
        was_running && self.remaining == 0
    }

    pub fn add(&mut self, bonus: u32) {
        self.remaining = self.remaining.saturating_add(bonus);
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn per_turn(&self) -> u32 {
        self.per_turn
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}
