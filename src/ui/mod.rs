//! User Interface module
//!
//! Full-screen ratatui front end plus a plain line-mode console.

pub mod app;
pub mod console;

pub use app::App;
pub use console::{Console, ConsoleError, PROMPT};
