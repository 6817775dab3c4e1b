//! Terminal UI application
//!
//! Maps keypresses to commands and draws the maze, status, and message log
//! with ratatui.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{Command, Direction, Game, MessageCategory};
use crate::render::{self, Glyph, RenderMode};

/// Main UI application
pub struct App {
    render_mode: RenderMode,
    /// Whether to emit 24-bit colours or the named 16-colour palette
    true_color: bool,
}

impl App {
    pub fn new(render_mode: RenderMode, true_color: bool) -> Self {
        log::info!(
            "UI using {} glyphs, true colour: {}",
            render_mode.name(),
            true_color
        );
        Self {
            render_mode,
            true_color,
        }
    }

    /// Translate a keypress into a turn command. Arrow keys move, Esc and
    /// Ctrl-C quit, any other key is an unrecognized (but still costly) turn.
    pub fn handle_key(&self, key: KeyEvent) -> Command {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Command::Quit;
        }

        match key.code {
            KeyCode::Up => Command::Move(Direction::Up),
            KeyCode::Down => Command::Move(Direction::Down),
            KeyCode::Left => Command::Move(Direction::Left),
            KeyCode::Right => Command::Move(Direction::Right),
            KeyCode::Esc => Command::Quit,
            KeyCode::Char(ch) => Command::from_key(ch),
            other => Command::Unrecognized(format!("{:?}", other)),
        }
    }

    pub fn render(&self, frame: &mut Frame, game: &Game) {
        let [title_area, map_area, status_area, log_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
            Constraint::Length(5),
        ])
        .areas(frame.area());

        self.render_title(frame, title_area);
        self.render_map(frame, game, map_area);
        self.render_status(frame, game, status_area);
        self.render_messages(frame, game, log_area);

        if game.is_over() {
            self.render_game_over(frame, game);
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new(Line::from(Span::styled(
            "NEON MAZE RUNNER",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        );
        frame.render_widget(title, area);
    }

    fn render_map(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let level = game.level();
        let grid = level.grid();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(
                " Level {} - {}x{} [{}] ",
                level.level(),
                grid.width(),
                grid.height(),
                self.render_mode.name()
            ))
            .border_style(Style::default().fg(Color::Magenta));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Follow the player when the maze is bigger than the panel
        let player = level.player().position();
        let (origin_x, pad_x) = viewport_axis(player.x, grid.width(), inner.width as i32);
        let (origin_y, pad_y) = viewport_axis(player.y, grid.height(), inner.height as i32);

        let rows = render::compose(level);
        let buf = frame.buffer_mut();
        for screen_y in 0..inner.height as i32 - pad_y {
            for screen_x in 0..inner.width as i32 - pad_x {
                let map_x = (origin_x + screen_x) as usize;
                let map_y = (origin_y + screen_y) as usize;
                let Some(glyph) = rows.get(map_y).and_then(|row| row.get(map_x)) else {
                    continue;
                };

                let cell = &mut buf[(
                    inner.x + (pad_x + screen_x) as u16,
                    inner.y + (pad_y + screen_y) as u16,
                )];
                cell.set_char(glyph.ch(self.render_mode));
                cell.set_fg(self.glyph_color(*glyph));
            }
        }
    }

    fn render_status(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let level = game.level();
        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!("Score: {}", level.score()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("Moves left: {}", level.moves_left()),
                Style::default().fg(Color::Green),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("Level: {}", level.level()),
                Style::default().fg(Color::Cyan),
            ),
        ])];

        for detail in render::detail_lines(level) {
            let color = if detail.starts_with("POWER") {
                Color::LightRed
            } else {
                Color::Yellow
            };
            lines.push(Line::from(Span::styled(detail, Style::default().fg(color))));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Status ")
            .title_bottom(format!(" {} ", render::CONTROLS_HINT))
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_messages(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Messages ")
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);

        let messages: Vec<Line> = game
            .messages()
            .iter()
            .rev()
            .take(inner.height as usize)
            .rev()
            .map(|msg| {
                let color = match msg.category {
                    MessageCategory::Item => Color::Yellow,
                    MessageCategory::System => Color::Cyan,
                    MessageCategory::Warning => Color::LightRed,
                };
                Line::from(Span::styled(msg.text.as_str(), Style::default().fg(color)))
            })
            .collect();

        frame.render_widget(Paragraph::new(messages).block(block), area);
    }

    fn render_game_over(&self, frame: &mut Frame, game: &Game) {
        let mut lines: Vec<Line> = render::summary_lines(game)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::Cyan))))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press any key to exit",
            Style::default().fg(Color::DarkGray),
        )));

        let area = centered_rect(40, lines.len() as u16 + 2, frame.area());
        let popup = Paragraph::new(lines).centered().block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        );
        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }

    fn glyph_color(&self, glyph: Glyph) -> Color {
        if self.true_color {
            let (r, g, b) = glyph.color();
            return Color::Rgb(r, g, b);
        }
        match glyph {
            Glyph::Wall => Color::Magenta,
            Glyph::NeonWall => Color::LightMagenta,
            Glyph::Path => Color::DarkGray,
            Glyph::Player => Color::Cyan,
            Glyph::PoweredPlayer => Color::LightRed,
            Glyph::Exit => Color::Green,
            Glyph::Gem => Color::Yellow,
            Glyph::Power => Color::Red,
            Glyph::Trail => Color::Blue,
        }
    }
}

/// First visible map coordinate and leading screen padding along one axis.
/// A maze that fits is centred; a larger one scrolls to keep `focus` in view.
fn viewport_axis(focus: i32, map_len: i32, view_len: i32) -> (i32, i32) {
    if map_len <= view_len {
        return (0, (view_len - map_len) / 2);
    }
    let origin = (focus - view_len / 2).clamp(0, map_len - view_len);
    (origin, 0)
}

/// A `width` x `height` rect centred in `area`, clamped to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
