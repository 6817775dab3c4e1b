//! Game save/load system
//!
//! A single save slot holding the whole session as JSON. Written on quit,
//! removed when a run ends.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::game::Game;

/// Save file version for compatibility checking
const SAVE_VERSION: u32 = 1;

/// Complete save data structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub game: Game,
}

/// Save error types
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("no save found at {0}")]
    NotFound(PathBuf),
}

impl SaveError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        SaveError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Get the data directory for saves and the profile
pub fn data_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "neonmaze", "NeonMaze") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        // Fallback to current directory
        PathBuf::from("./saves")
    }
}

/// Where the save slot lives
pub fn save_path() -> PathBuf {
    data_directory().join("save.json")
}

pub fn save_exists() -> bool {
    save_path().exists()
}

/// Load a game from the default slot
pub fn load_game() -> Result<Game, SaveError> {
    load_game_from(&save_path())
}

pub fn save_game_to(path: &Path, game: &Game) -> Result<(), SaveError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| SaveError::io(dir, e))?;
    }

    let save_data = SaveData {
        version: SAVE_VERSION,
        game: game.clone(),
    };
    let json = serde_json::to_string_pretty(&save_data)?;
    fs::write(path, json).map_err(|e| SaveError::io(path, e))?;

    log::info!(
        "Game saved to {} (level {}, score {})",
        path.display(),
        game.level_number(),
        game.score()
    );
    Ok(())
}

pub fn load_game_from(path: &Path) -> Result<Game, SaveError> {
    if !path.exists() {
        return Err(SaveError::NotFound(path.to_path_buf()));
    }
    let data = fs::read_to_string(path).map_err(|e| SaveError::io(path, e))?;
    let save: SaveData = serde_json::from_str(&data)?;

    // Version check
    if save.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save.version,
        });
    }

    let mut game = save.game;
    game.resume();
    log::info!("Game loaded from {}", path.display());
    Ok(game)
}

pub fn delete_save_at(path: &Path) -> Result<(), SaveError> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| SaveError::io(path, e))?;
        log::info!("Deleted save {}", path.display());
    }
    Ok(())
}
