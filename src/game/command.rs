//! Player commands
//!
//! One command per turn. Text input is matched case-insensitively; anything
//! unknown becomes [`Command::Unrecognized`], which still costs a turn.

use serde::{Deserialize, Serialize};

/// A movement direction on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Cell offset `(dx, dy)` for one step
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// What the player asked for this turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Quit,
    /// Input that matched nothing; the turn is spent standing still
    Unrecognized(String),
}

impl Command {
    /// Parse one line of input: `w/up`, `s/down`, `a/left`, `d/right`, `q/quit`
    pub fn parse(input: &str) -> Self {
        let normalized = input.trim().to_lowercase();
        match normalized.as_str() {
            "w" | "up" => Command::Move(Direction::Up),
            "s" | "down" => Command::Move(Direction::Down),
            "a" | "left" => Command::Move(Direction::Left),
            "d" | "right" => Command::Move(Direction::Right),
            "q" | "quit" => Command::Quit,
            _ => Command::Unrecognized(input.trim().to_string()),
        }
    }

    /// Single keypress variant used by the terminal UI
    pub fn from_key(ch: char) -> Self {
        let mut buf = [0u8; 4];
        Self::parse(ch.encode_utf8(&mut buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_letters_and_words() {
        assert_eq!(Command::parse("w"), Command::Move(Direction::Up));
        assert_eq!(Command::parse("down"), Command::Move(Direction::Down));
        assert_eq!(Command::parse("a"), Command::Move(Direction::Left));
        assert_eq!(Command::parse("right"), Command::Move(Direction::Right));
        assert_eq!(Command::parse("quit"), Command::Quit);
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(Command::parse("  D \n"), Command::Move(Direction::Right));
        assert_eq!(Command::parse("UP"), Command::Move(Direction::Up));
        assert_eq!(Command::parse("Q"), Command::Quit);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Command::parse("x"), Command::Unrecognized("x".to_string()));
        assert_eq!(Command::parse(""), Command::Unrecognized(String::new()));
        assert_eq!(
            Command::parse("north"),
            Command::Unrecognized("north".to_string())
        );
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Command::from_key('S'), Command::Move(Direction::Down));
        assert_eq!(Command::from_key('z'), Command::Unrecognized("z".to_string()));
    }
}
