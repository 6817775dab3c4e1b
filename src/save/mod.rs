//! Save/load system
//!
//! Handles the resumable save slot, the player profile, and how a finished
//! run updates both.

pub mod profile;
pub mod run_end;
pub mod save_game;

pub use save_game::{
    data_directory, delete_save_at, load_game, load_game_from, save_exists, save_game_to,
    save_path, SaveData, SaveError,
};

pub use profile::{
    all_achievements, load_profile_from, profile_path, save_profile_to, Achievement,
    PlayerProfile, ProfileStats,
};

pub use run_end::{conclude_run, RunConclusion, SlotPaths};
