//! Rendering
//!
//! Turns a level into glyph rows. Both front ends draw from the same
//! composition so the console and the TUI always agree.

pub mod glyphs;
pub mod mode;
pub mod view;

pub use glyphs::Glyph;
pub use mode::{detect_render_mode, detect_true_color, RenderMode};
pub use view::{
    compose, detail_lines, glyph_at, render_text, status_line, summary_lines,
    CONTROLS_HINT,
};
