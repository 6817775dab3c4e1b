//! External game data
//!
//! Tuning values live in a RON file and fall back to built-in defaults.

pub mod config;

pub use config::{default_config_path, ConfigError, GameConfig, CONFIG_FILE_NAME};
