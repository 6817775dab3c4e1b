//! What happens to the save slot and profile when a run stops
//!
//! A quit run is parked in the slot. A run that is over for good is folded
//! into the profile, and the slot is only cleared when that run came from it.

use std::path::PathBuf;

use super::profile::{all_achievements, load_profile_from, profile_path, save_profile_to, Achievement};
use super::save_game::{delete_save_at, load_game_from, save_game_to, save_path};
use crate::game::{Game, GamePhase};

/// Save slot and profile locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPaths {
    pub save: PathBuf,
    pub profile: PathBuf,
}

impl Default for SlotPaths {
    fn default() -> Self {
        Self {
            save: save_path(),
            profile: profile_path(),
        }
    }
}

/// Summary of [`conclude_run`] for the player
#[derive(Debug, Clone, Default)]
pub struct RunConclusion {
    /// The run was parked in the save slot for `--resume`
    pub saved: bool,
    pub new_high_score: bool,
    pub unlocked: Vec<Achievement>,
}

/// Settle a stopped run. `resumed` says whether it was loaded from the slot.
///
/// Quitting parks the run in the slot. A different run already parked there
/// is displaced, so it is counted in the profile first. Any other ending
/// counts the run, and clears the slot only if the run came from it.
pub fn conclude_run(game: &Game, resumed: bool, paths: &SlotPaths) -> RunConclusion {
    let mut finished = Vec::new();
    let mut saved = false;

    if game.phase() == GamePhase::Quit {
        if !resumed && paths.save.exists() {
            match load_game_from(&paths.save) {
                Ok(displaced) => {
                    log::info!(
                        "Replacing saved run {} at level {}",
                        displaced.seed(),
                        displaced.level_number()
                    );
                    finished.push(displaced);
                }
                Err(e) => log::warn!("Overwriting unreadable save: {}", e),
            }
        }

        match save_game_to(&paths.save, game) {
            Ok(()) => saved = true,
            Err(e) => log::warn!("Failed to save run: {}", e),
        }
    } else if resumed {
        if let Err(e) = delete_save_at(&paths.save) {
            log::warn!("Failed to delete save: {}", e);
        }
    }

    let mut profile = load_profile_from(&paths.profile);
    let before = profile.achievements.clone();
    let mut new_high_score = false;

    for run in &finished {
        profile.record_run(run);
    }
    if !saved {
        new_high_score = profile.record_run(game);
    }

    if !finished.is_empty() || !saved {
        if let Err(e) = save_profile_to(&paths.profile, &profile) {
            log::warn!("Failed to save profile: {}", e);
        }
    }

    let unlocked = all_achievements()
        .into_iter()
        .filter(|a| profile.achievements.contains(a.id) && !before.contains(a.id))
        .collect();

    RunConclusion {
        saved,
        new_high_score,
        unlocked,
    }
}
