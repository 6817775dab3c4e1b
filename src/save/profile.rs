//! Player profile and persistent records
//!
//! Tracks high scores, totals, and achievements across runs.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::save_game::{data_directory, SaveError};
use crate::game::{Game, GamePhase};

/// Current profile version for compatibility
const PROFILE_VERSION: u32 = 1;

/// Persistent player profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Version for compatibility checking
    pub version: u32,
    pub stats: ProfileStats,
    /// Best final score of any run
    pub high_score: u64,
    /// Deepest level reached
    pub best_level: u32,
    /// Unlocked achievement ids
    pub achievements: HashSet<String>,
}

/// Totals across all runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub games_played: u32,
    pub games_timed_out: u32,
    pub levels_completed: u32,
    pub gems_collected: u64,
    pub powers_collected: u64,
    pub turns_taken: u64,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            version: PROFILE_VERSION,
            stats: ProfileStats::default(),
            high_score: 0,
            best_level: 0,
            achievements: HashSet::new(),
        }
    }
}

impl PlayerProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished run into the profile. Returns true on a new high score.
    pub fn record_run(&mut self, game: &Game) -> bool {
        let stats = game.stats();
        self.stats.games_played += 1;
        if game.phase() == GamePhase::GameOver {
            self.stats.games_timed_out += 1;
        }
        self.stats.levels_completed += stats.levels_completed;
        self.stats.gems_collected += stats.gems_collected as u64;
        self.stats.powers_collected += stats.powers_collected as u64;
        self.stats.turns_taken += stats.turns;
        self.best_level = self.best_level.max(game.level_number());

        let new_high = game.score() > self.high_score;
        if new_high {
            self.high_score = game.score();
        }

        self.check_achievements(game);
        new_high
    }

    pub fn has_achievement(&self, achievement_id: &str) -> bool {
        self.achievements.contains(achievement_id)
    }

    /// Unlock an achievement, returning true if it was new
    pub fn unlock_achievement(&mut self, achievement_id: &str) -> bool {
        if self.achievements.insert(achievement_id.to_string()) {
            log::info!("Achievement unlocked: {}", achievement_id);
            true
        } else {
            false
        }
    }

    fn check_achievements(&mut self, game: &Game) {
        if game.stats().levels_completed >= 1 {
            self.unlock_achievement("first_escape");
        }
        if game.level_number() >= 5 {
            self.unlock_achievement("reach_level_5");
        }
        if game.score() >= 1000 {
            self.unlock_achievement("score_1000");
        }
        if self.stats.gems_collected >= 100 {
            self.unlock_achievement("gems_100");
        }
    }
}

/// Achievement definition
#[derive(Debug, Clone)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Get all achievement definitions
pub fn all_achievements() -> Vec<Achievement> {
    vec![
        Achievement {
            id: "first_escape",
            name: "Lights On",
            description: "Complete a level",
        },
        Achievement {
            id: "reach_level_5",
            name: "Deep Glow",
            description: "Reach level 5 in one run",
        },
        Achievement {
            id: "score_1000",
            name: "High Voltage",
            description: "Score 1,000 points in one run",
        },
        Achievement {
            id: "gems_100",
            name: "Collector",
            description: "Collect 100 gems in total",
        },
    ]
}

pub fn profile_path() -> PathBuf {
    data_directory().join("profile.json")
}

/// Load the profile, starting fresh if it is missing or unreadable
pub fn load_profile_from(path: &Path) -> PlayerProfile {
    if !path.exists() {
        return PlayerProfile::default();
    }
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str::<PlayerProfile>(&data) {
            Ok(profile) if profile.version == PROFILE_VERSION => profile,
            Ok(profile) => {
                log::warn!(
                    "Profile version {} unsupported, starting fresh",
                    profile.version
                );
                PlayerProfile::default()
            }
            Err(e) => {
                log::warn!("Failed to parse profile: {}", e);
                PlayerProfile::default()
            }
        },
        Err(e) => {
            log::warn!("Failed to read profile: {}", e);
            PlayerProfile::default()
        }
    }
}

pub fn save_profile_to(path: &Path, profile: &PlayerProfile) -> Result<(), SaveError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| SaveError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(profile)?;
    fs::write(path, json).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
