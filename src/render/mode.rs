//! Render mode detection and configuration
//!
//! Picks Unicode glyphs when the terminal can show them and falls back to
//! plain ASCII otherwise.

use std::env;

/// Environment variable that forces a mode (`ascii` or `unicode`)
pub const RENDER_MODE_VAR: &str = "NEON_MAZE_RENDER";

/// Available rendering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Classic ASCII characters (# @ * etc.)
    /// Works everywhere
    Ascii,

    /// Unicode symbols (█ ● ◆ ★ etc.)
    #[default]
    Unicode,
}

impl RenderMode {
    /// Get a human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Ascii => "ASCII",
            RenderMode::Unicode => "Unicode",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "ascii" => Some(RenderMode::Ascii),
            "unicode" | "utf8" | "utf-8" => Some(RenderMode::Unicode),
            _ => None,
        }
    }
}

/// Detect the best rendering mode for the current terminal
pub fn detect_render_mode() -> RenderMode {
    let mode = mode_from_env(|key| env::var(key).ok());
    log::info!("Using {} rendering mode", mode.name());
    mode
}

/// Mode selection from an environment lookup
fn mode_from_env(lookup: impl Fn(&str) -> Option<String>) -> RenderMode {
    if let Some(forced) = lookup(RENDER_MODE_VAR).and_then(|v| RenderMode::from_name(&v)) {
        return forced;
    }

    // LC_ALL wins over LANG when both are set
    let locale = lookup("LC_ALL")
        .filter(|v| !v.is_empty())
        .or_else(|| lookup("LANG"));
    if let Some(locale) = locale {
        let upper = locale.to_uppercase();
        return if upper.contains("UTF-8") || upper.contains("UTF8") {
            RenderMode::Unicode
        } else {
            RenderMode::Ascii
        };
    }

    // The Linux console font lacks most of the glyphs
    match lookup("TERM").as_deref() {
        Some("linux") | Some("dumb") => RenderMode::Ascii,
        _ => RenderMode::Unicode,
    }
}

/// Check if true color (24-bit) is supported
pub fn detect_true_color() -> bool {
    match env::var("COLORTERM") {
        Ok(colorterm) => {
            let ct = colorterm.to_lowercase();
            ct.contains("truecolor") || ct.contains("24bit")
        }
        Err(_) => false,
    }
}
