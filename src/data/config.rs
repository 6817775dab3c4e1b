//! Game tuning loaded from RON
//!
//! Every knob has a default matching the classic Neon Maze feel. A config
//! file only needs the fields it wants to change.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::entities::CollectibleKind;
use crate::game::TurnRules;
use crate::world::{Placement, MIN_DIMENSION};

/// File name looked up in the user config directory
pub const CONFIG_FILE_NAME: &str = "neon-maze.ron";

/// Errors while reading or checking a config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunable parameters for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maze width on level 1
    pub initial_width: i32,
    /// Maze height on level 1
    pub initial_height: i32,
    /// Added to both dimensions after each completed level
    pub size_increment: i32,
    pub max_width: i32,
    pub max_height: i32,
    /// Past positions drawn as the trail
    pub trail_capacity: usize,
    /// Countdown at the start of a run, in moves
    pub starting_moves: u32,
    /// Countdown cost of every processed turn
    pub moves_per_turn: u32,
    /// Gems on level N = gems_base + gems_per_level * N
    pub gems_base: usize,
    pub gems_per_level: usize,
    pub gem_value: u32,
    pub powers_per_level: usize,
    pub power_value: u32,
    /// Countdown refund for grabbing a power-up
    pub power_bonus_moves: u32,
    /// How long power mode lasts, in moves
    pub power_mode_moves: u32,
    /// Countdown refund for finishing a level
    pub level_time_bonus: u32,
    /// Score per move left on the countdown when a level is finished
    pub completion_bonus_per_move: u32,
    /// Random wall openings attempted per level number
    pub shortcuts_per_level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_width: 25,
            initial_height: 15,
            size_increment: 2,
            max_width: 35,
            max_height: 25,
            trail_capacity: crate::entities::DEFAULT_TRAIL_CAPACITY,
            starting_moves: 600,
            moves_per_turn: 1,
            gems_base: 5,
            gems_per_level: 1,
            gem_value: 10,
            powers_per_level: 2,
            power_value: 50,
            power_bonus_moves: 100,
            power_mode_moves: 100,
            level_time_bonus: 300,
            completion_bonus_per_move: 1,
            shortcuts_per_level: 2,
        }
    }
}

impl GameConfig {
    /// Load the config, falling back to defaults when the file is missing
    /// or broken. An explicit path that fails is still only a warning.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(p) => p,
            None => return Self::default(),
        };

        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    /// Read and validate a RON config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Reject settings that could only produce broken levels
    pub fn validate(&self) -> Result<(), ConfigError> {
        let odd_and_big = |d: i32| d >= MIN_DIMENSION && d % 2 == 1;

        if !odd_and_big(self.initial_width) || !odd_and_big(self.initial_height) {
            return Err(ConfigError::Invalid(format!(
                "initial size {}x{} must be odd and at least {}",
                self.initial_width, self.initial_height, MIN_DIMENSION
            )));
        }
        if self.max_width < self.initial_width || self.max_height < self.initial_height {
            return Err(ConfigError::Invalid(
                "max size must not be smaller than initial size".to_string(),
            ));
        }
        if !odd_and_big(self.max_width) || !odd_and_big(self.max_height) {
            return Err(ConfigError::Invalid(format!(
                "max size {}x{} must be odd",
                self.max_width, self.max_height
            )));
        }
        if self.size_increment < 0 || self.size_increment % 2 != 0 {
            return Err(ConfigError::Invalid(format!(
                "size increment {} must be even and non-negative",
                self.size_increment
            )));
        }
        if self.trail_capacity == 0 {
            return Err(ConfigError::Invalid("trail capacity must be at least 1".to_string()));
        }
        if self.starting_moves == 0 {
            return Err(ConfigError::Invalid("starting moves must be positive".to_string()));
        }
        Ok(())
    }

    /// Maze size for a 1-based level number, capped at the maximum
    pub fn dimensions_for_level(&self, level: u32) -> (i32, i32) {
        let grown = (level.saturating_sub(1) as i32).saturating_mul(self.size_increment);
        (
            self.initial_width.saturating_add(grown).min(self.max_width),
            self.initial_height.saturating_add(grown).min(self.max_height),
        )
    }

    /// What to scatter on a level
    pub fn placements_for_level(&self, level: u32) -> Vec<Placement> {
        vec![
            Placement::new(
                CollectibleKind::Gem,
                self.gems_base
                    .saturating_add(self.gems_per_level.saturating_mul(level as usize)),
                self.gem_value,
            ),
            Placement::new(CollectibleKind::Power, self.powers_per_level, self.power_value),
        ]
    }

    pub fn turn_rules(&self) -> TurnRules {
        TurnRules {
            power_bonus_moves: self.power_bonus_moves,
            power_mode_moves: self.power_mode_moves,
        }
    }
}

/// `<config dir>/neon-maze.ron`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    use directories::ProjectDirs;

    ProjectDirs::from("com", "neonmaze", "NeonMaze")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_dimensions_grow_and_cap() {
        let config = GameConfig::default();
        assert_eq!(config.dimensions_for_level(1), (25, 15));
        assert_eq!(config.dimensions_for_level(2), (27, 17));
        assert_eq!(config.dimensions_for_level(6), (35, 25));
        assert_eq!(config.dimensions_for_level(40), (35, 25));
    }

    #[test]
    fn test_placements_scale_with_level() {
        let config = GameConfig::default();
        let placements = config.placements_for_level(3);
        assert_eq!(placements[0].kind, CollectibleKind::Gem);
        assert_eq!(placements[0].count, 8);
        assert_eq!(placements[1].count, 2);
    }

    #[test]
    fn test_huge_gem_counts_saturate() {
        let config = GameConfig::from_ron("(gems_base: 18446744073709551615)").unwrap();
        assert_eq!(config.placements_for_level(3)[0].count, usize::MAX);
    }

    #[test]
    fn test_partial_ron_keeps_other_defaults() {
        let config = GameConfig::from_ron("(initial_width: 11, initial_height: 9)").unwrap();
        assert_eq!(config.initial_width, 11);
        assert_eq!(config.initial_height, 9);
        assert_eq!(config.gem_value, 10);
    }

    #[test]
    fn test_rejects_even_dimensions() {
        let err = GameConfig::from_ron("(initial_width: 10)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            GameConfig::from_ron("not ron at all ((").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn test_ron_round_trip() {
        let config = GameConfig {
            gem_value: 25,
            ..GameConfig::default()
        };
        let text = config.to_ron().unwrap();
        assert_eq!(GameConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn test_load_falls_back_on_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        fs::write(&path, "(initial_width: 4)").unwrap();
        assert_eq!(GameConfig::load(Some(&path)), GameConfig::default());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "(starting_moves: 42)").unwrap();
        assert_eq!(GameConfig::load(Some(&path)).starting_moves, 42);
    }
}
