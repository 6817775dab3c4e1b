//! Full-frame text view of a level
//!
//! Every turn redraws the whole grid; nothing is diffed.

use super::glyphs::Glyph;
use super::mode::RenderMode;
use crate::entities::CollectibleKind;
use crate::game::{Game, GamePhase, LevelState};
use crate::world::{Cell, Position};

/// Roughly one wall in ten flickers on any given turn
const FLICKER_ONE_IN: u64 = 10;

/// Width of the banner rules around the maze
const BANNER_WIDTH: usize = 50;

/// Pick what to draw in one cell. Player beats exit beats pickups beats trail.
pub fn glyph_at(level: &LevelState, pos: Position) -> Glyph {
    if pos == level.player().position() {
        return if level.power_mode() {
            Glyph::PoweredPlayer
        } else {
            Glyph::Player
        };
    }
    if pos == level.exit() {
        return Glyph::Exit;
    }
    if let Some(item) = level.collectible_at(pos) {
        return match item.kind {
            CollectibleKind::Gem => Glyph::Gem,
            CollectibleKind::Power => Glyph::Power,
        };
    }
    if level.player().is_on_trail(pos) {
        return Glyph::Trail;
    }
    match level.grid().get(pos) {
        Some(Cell::Path) => Glyph::Path,
        Some(Cell::Wall) | None => {
            if flickers(pos, level.turns()) {
                Glyph::NeonWall
            } else {
                Glyph::Wall
            }
        }
    }
}

/// Glyph rows for the entire grid
pub fn compose(level: &LevelState) -> Vec<Vec<Glyph>> {
    let grid = level.grid();
    (0..grid.height())
        .map(|y| {
            (0..grid.width())
                .map(|x| glyph_at(level, Position::new(x, y)))
                .collect()
        })
        .collect()
}

/// Deterministic wall flicker so redraws are reproducible
fn flickers(pos: Position, turn: u32) -> bool {
    let mut h = (pos.x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    h ^= (pos.y as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h ^= (turn as u64).wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^= h >> 31;
    h % FLICKER_ONE_IN == 0
}

/// `Score: S | Moves left: M | Level: L`
pub fn status_line(level: &LevelState) -> String {
    format!(
        "Score: {} | Moves left: {} | Level: {}",
        level.score(),
        level.moves_left(),
        level.level()
    )
}

/// The lines under the status line
pub fn detail_lines(level: &LevelState) -> Vec<String> {
    let mut lines = vec![format!("Gems remaining: {}", level.gems_remaining())];
    if level.power_mode() {
        lines.push(format!("POWER MODE: {} moves", level.power_turns()));
    }
    lines
}

pub const CONTROLS_HINT: &str = "Controls: W/A/S/D - Move, Q - Quit";

/// End-of-run summary
pub fn summary_lines(game: &Game) -> Vec<String> {
    let headline = match game.phase() {
        GamePhase::GameOver => "GAME OVER! Out of moves.",
        GamePhase::Quit | GamePhase::Playing => "GAME OVER!",
    };
    vec![
        headline.to_string(),
        format!("Final Score: {}", game.score()),
        format!("Levels Completed: {}", game.stats().levels_completed),
        format!("Gems Collected: {}", game.stats().gems_collected),
    ]
}

/// Render the full screen as plain text for line-mode play
pub fn render_text(game: &Game, mode: RenderMode) -> String {
    let level = game.level();
    let rule = "=".repeat(BANNER_WIDTH);
    let mut out = String::new();

    out.push_str(&rule);
    out.push('\n');
    out.push_str("NEON MAZE RUNNER\n");
    out.push_str(&rule);
    out.push('\n');

    for row in compose(level) {
        out.extend(row.iter().map(|g| g.ch(mode)));
        out.push('\n');
    }

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&status_line(level));
    out.push('\n');
    for line in detail_lines(level) {
        out.push_str(&line);
        out.push('\n');
    }
    if let Some(last) = game.messages().last() {
        out.push_str(&last.text);
        out.push('\n');
    }
    out.push_str(CONTROLS_HINT);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Collectible;
    use crate::game::{Command, Countdown, Direction, TurnRules};
    use crate::world::Grid;

    const RULES: TurnRules = TurnRules {
        power_bonus_moves: 5,
        power_mode_moves: 3,
    };

    fn level() -> LevelState {
        let grid = Grid::from_ascii(&["#####", "#...#", "#...#", "#...#", "#####"]).unwrap();
        LevelState::new(
            2,
            grid,
            vec![
                Collectible::gem(Position::new(2, 2), 10),
                Collectible::power(Position::new(1, 3), 50),
            ],
            Countdown::new(10, 1),
            5,
        )
    }

    #[test]
    fn test_compose_places_entities() {
        let rows = compose(&level());
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.len() == 5));
        assert_eq!(rows[1][1], Glyph::Player);
        assert_eq!(rows[3][3], Glyph::Exit);
        assert_eq!(rows[2][2], Glyph::Gem);
        assert_eq!(rows[3][1], Glyph::Power);
        assert_eq!(rows[1][2], Glyph::Path);
        assert!(matches!(rows[0][0], Glyph::Wall | Glyph::NeonWall));
    }

    #[test]
    fn test_trail_and_power_mode() {
        let mut level = level();
        level.apply(&Command::Move(Direction::Down), &RULES);
        level.apply(&Command::Move(Direction::Down), &RULES);

        let rows = compose(&level);
        assert_eq!(rows[3][1], Glyph::PoweredPlayer);
        assert_eq!(rows[1][1], Glyph::Trail);
        assert_eq!(rows[2][1], Glyph::Trail);
    }

    #[test]
    fn test_status_line() {
        assert_eq!(status_line(&level()), "Score: 0 | Moves left: 10 | Level: 2");
        assert_eq!(detail_lines(&level()), vec!["Gems remaining: 1".to_string()]);
    }

    #[test]
    fn test_flicker_is_deterministic_and_sparse() {
        let mut lit = 0;
        for x in 0..100 {
            for y in 0..10 {
                assert_eq!(flickers(Position::new(x, y), 4), flickers(Position::new(x, y), 4));
                if flickers(Position::new(x, y), 4) {
                    lit += 1;
                }
            }
        }
        assert!(lit > 0 && lit < 300, "flicker count {}", lit);
    }

    #[test]
    fn test_render_text_ascii() {
        let game = Game::new(crate::data::GameConfig::default(), Some(10)).unwrap();
        let text = render_text(&game, RenderMode::Ascii);
        assert!(text.contains("Score: 0 | Moves left: 600 | Level: 1"));
        assert!(text.contains('@'));
        assert!(text.contains('>'));
        assert_eq!(text.matches('*').count(), 6);
        assert!(text.is_ascii());
    }

    #[test]
    fn test_summary_after_quit() {
        let mut game = Game::new(crate::data::GameConfig::default(), Some(10)).unwrap();
        game.play_turn(&Command::Quit).unwrap();
        let lines = summary_lines(&game);
        assert_eq!(lines[0], "GAME OVER!");
        assert_eq!(lines[1], "Final Score: 0");
        assert_eq!(lines[2], "Levels Completed: 0");
    }
}
