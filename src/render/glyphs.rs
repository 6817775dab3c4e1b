//! Glyph set and neon palette

use super::mode::RenderMode;

/// Everything that can occupy a drawn cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Wall,
    /// Wall drawn in the brighter flicker shade
    NeonWall,
    Path,
    Player,
    /// Player while power mode is active
    PoweredPlayer,
    Exit,
    Gem,
    Power,
    Trail,
}

impl Glyph {
    pub fn ch(&self, mode: RenderMode) -> char {
        match mode {
            RenderMode::Unicode => match self {
                Glyph::Wall => '█',
                Glyph::NeonWall => '▓',
                Glyph::Path => ' ',
                Glyph::Player => '●',
                Glyph::PoweredPlayer => '◉',
                Glyph::Exit => '★',
                Glyph::Gem => '◆',
                Glyph::Power => '✦',
                Glyph::Trail => '·',
            },
            RenderMode::Ascii => match self {
                Glyph::Wall => '#',
                Glyph::NeonWall => '%',
                Glyph::Path => ' ',
                Glyph::Player => '@',
                Glyph::PoweredPlayer => '&',
                Glyph::Exit => '>',
                Glyph::Gem => '*',
                Glyph::Power => '+',
                Glyph::Trail => '.',
            },
        }
    }

    /// Foreground colour (RGB)
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Glyph::Wall => (200, 40, 200),      // Magenta
            Glyph::NeonWall => (255, 110, 255), // Hot pink
            Glyph::Path => (60, 60, 60),
            Glyph::Player => (0, 230, 230),     // Cyan
            Glyph::PoweredPlayer => (255, 60, 60),
            Glyph::Exit => (60, 255, 120),      // Green
            Glyph::Gem => (255, 220, 40),       // Yellow
            Glyph::Power => (255, 80, 80),      // Red
            Glyph::Trail => (80, 120, 255),     // Blue
        }
    }
}
