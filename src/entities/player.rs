//! The player and their fading trail

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::world::Position;

/// Default number of past positions kept for the trail effect
pub const DEFAULT_TRAIL_CAPACITY: usize = 5;

/// Player position plus a short history of where they have been.
/// The trail is purely visual and never affects movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    position: Position,
    trail: VecDeque<Position>,
    trail_capacity: usize,
}

impl Player {
    pub fn new(position: Position, trail_capacity: usize) -> Self {
        Self {
            position,
            trail: VecDeque::with_capacity(trail_capacity),
            trail_capacity,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Trail positions, oldest first
    pub fn trail(&self) -> impl Iterator<Item = &Position> {
        self.trail.iter()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    pub fn trail_capacity(&self) -> usize {
        self.trail_capacity
    }

    pub fn is_on_trail(&self, pos: Position) -> bool {
        self.trail.contains(&pos)
    }

    /// Step to a new cell, remembering the old one on the trail
    pub fn move_to(&mut self, pos: Position) {
        // A loaded trail may already be over capacity
        while self.trail.len() >= self.trail_capacity.max(1) {
            self.trail.pop_front();
        }
        if self.trail_capacity > 0 {
            self.trail.push_back(self.position);
        }
        self.position = pos;
    }

    /// Put the player back on a fresh cell with no trail
    pub fn reset(&mut self, pos: Position) {
        self.position = pos;
        self.trail.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_records_previous_positions() {
        let mut player = Player::new(Position::new(1, 1), 3);
        player.move_to(Position::new(2, 1));
        player.move_to(Position::new(3, 1));

        assert_eq!(player.position(), Position::new(3, 1));
        let trail: Vec<_> = player.trail().copied().collect();
        assert_eq!(trail, vec![Position::new(1, 1), Position::new(2, 1)]);
    }

    #[test]
    fn test_trail_evicts_oldest() {
        let mut player = Player::new(Position::new(0, 0), 3);
        for x in 1..=10 {
            player.move_to(Position::new(x, 0));
        }
        assert_eq!(player.trail_len(), 3);
        let trail: Vec<_> = player.trail().copied().collect();
        assert_eq!(
            trail,
            vec![Position::new(7, 0), Position::new(8, 0), Position::new(9, 0)]
        );
    }

    #[test]
    fn test_zero_capacity_keeps_no_trail() {
        let mut player = Player::new(Position::new(0, 0), 0);
        player.move_to(Position::new(1, 0));
        assert_eq!(player.trail_len(), 0);
    }

    #[test]
    fn test_oversized_loaded_trail_shrinks_to_capacity() {
        let json = r#"{
            "position": {"x": 5, "y": 1},
            "trail": [{"x": 1, "y": 1}, {"x": 2, "y": 1}, {"x": 3, "y": 1}, {"x": 4, "y": 1}],
            "trail_capacity": 2
        }"#;
        let mut player: Player = serde_json::from_str(json).unwrap();

        player.move_to(Position::new(6, 1));
        assert_eq!(player.trail_len(), 2);
        let trail: Vec<_> = player.trail().copied().collect();
        assert_eq!(trail, vec![Position::new(4, 1), Position::new(5, 1)]);

        player.move_to(Position::new(7, 1));
        assert_eq!(player.trail_len(), 2);
    }

    #[test]
    fn test_reset_clears_trail() {
        let mut player = Player::new(Position::new(1, 1), DEFAULT_TRAIL_CAPACITY);
        player.move_to(Position::new(1, 2));
        player.reset(Position::new(1, 1));
        assert_eq!(player.position(), Position::new(1, 1));
        assert_eq!(player.trail_len(), 0);
    }
}
