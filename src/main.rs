//! Neon Maze - Entry Point
//!
//! Parses the command line, sets up logging, builds or resumes a run, and
//! hands it to either the full-screen TUI or the line-mode console.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use neon_maze::data::GameConfig;
use neon_maze::game::Game;
use neon_maze::render::{detect_render_mode, detect_true_color, summary_lines, RenderMode};
use neon_maze::save::{self, conclude_run, SlotPaths};
use neon_maze::ui::{App, Console};

const LOG_FILE: &str = "neon-maze.log";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the run; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Play in line mode instead of the full-screen UI
    #[arg(long)]
    console: bool,

    /// Force ASCII glyphs
    #[arg(long)]
    ascii: bool,

    /// Path to a RON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Continue the saved run if there is one
    #[arg(short, long)]
    resume: bool,

    /// Log filter, e.g. `debug` or `neon_maze=trace`
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the effective config as RON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    log::info!("Starting Neon Maze v{}", env!("CARGO_PKG_VERSION"));

    let config = GameConfig::load(args.config.as_deref());
    if args.dump_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    let (mut game, resumed) = start_game(&args, config)?;
    let render_mode = if args.ascii {
        RenderMode::Ascii
    } else {
        detect_render_mode()
    };

    if args.console {
        let stdin = io::stdin();
        Console::new(stdin.lock(), io::stdout(), render_mode)
            .with_clear_screen(true)
            .run(&mut game)?;
    } else {
        run_tui(&mut game, render_mode)?;
        for line in summary_lines(&game) {
            println!("{}", line);
        }
    }

    finish_run(&game, resumed);
    log::info!("Neon Maze shut down cleanly");
    Ok(())
}

/// The TUI owns the terminal, so its logs go to a file instead
fn init_logging(args: &Args) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level));

    if !args.console && !args.dump_config {
        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(LOG_FILE)
        {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    builder.init();
}

/// Returns the run and whether it came from the save slot
fn start_game(args: &Args, config: GameConfig) -> Result<(Game, bool)> {
    if args.resume && save::save_exists() {
        match save::load_game() {
            Ok(game) => {
                log::info!(
                    "Resumed run with seed {} on level {}",
                    game.seed(),
                    game.level_number()
                );
                return Ok((game, true));
            }
            Err(e) => log::warn!("Could not resume saved run: {}. Starting fresh.", e),
        }
    }

    let game = Game::new(config, args.seed).context("failed to start a new run")?;
    log::info!("New run with seed {}", game.seed());
    Ok((game, false))
}

fn run_tui(game: &mut Game, render_mode: RenderMode) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(render_mode, detect_true_color());
    let result = run_game_loop(&mut terminal, &app, game);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Game exited with error: {}", e);
    }
    result
}

/// Turn loop: draw, block for one keypress, apply it
fn run_game_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &App,
    game: &mut Game,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame, game))?;

        let key = match event::read()? {
            // Only handle key press events, not releases
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        if game.is_over() {
            return Ok(());
        }

        let command = app.handle_key(key);
        let report = game.play_turn(&command)?;
        log::debug!("Turn result: {:?}", report.outcome);
    }
}

fn finish_run(game: &Game, resumed: bool) {
    let conclusion = conclude_run(game, resumed, &SlotPaths::default());
    if conclusion.saved {
        println!("Run saved. Continue it with --resume.");
    }
    if conclusion.new_high_score {
        println!("New high score: {}", game.score());
    }
    for achievement in &conclusion.unlocked {
        println!("Achievement unlocked: {} - {}", achievement.name, achievement.description);
    }
}
