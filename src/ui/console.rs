//! Line-mode front end
//!
//! Reads one command per line and redraws the whole maze after every turn.
//! Works over any reader/writer pair, which keeps it testable.

use std::io::{BufRead, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use crate::game::{Command, Game, GameError};
use crate::render::{render_text, summary_lines, RenderMode};

pub const PROMPT: &str = "Enter move (w/a/s/d/q): ";

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

pub struct Console<R, W> {
    input: R,
    output: W,
    render_mode: RenderMode,
    /// Clear the terminal before each redraw
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, render_mode: RenderMode) -> Self {
        Self {
            input,
            output,
            render_mode,
            clear_screen: false,
        }
    }

    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    /// Play until the run ends. End of input counts as quitting.
    pub fn run(&mut self, game: &mut Game) -> Result<(), ConsoleError> {
        let mut line = String::new();

        while !game.is_over() {
            self.draw(game)?;
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            line.clear();
            let command = if self.input.read_line(&mut line)? == 0 {
                log::info!("Input closed, quitting");
                Command::Quit
            } else {
                Command::parse(&line)
            };

            let report = game.play_turn(&command)?;
            log::debug!("Turn result: {:?}", report.outcome);
        }

        self.draw(game)?;
        for line in summary_lines(game) {
            writeln!(self.output, "{}", line)?;
        }
        self.output.flush()?;
        Ok(())
    }

    fn draw(&mut self, game: &Game) -> Result<(), ConsoleError> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        write!(self.output, "{}", render_text(game, self.render_mode))?;
        Ok(())
    }
}
