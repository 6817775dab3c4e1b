//! Things that live on the maze: the player and the pickups

pub mod collectible;
pub mod player;

pub use collectible::{Collectible, CollectibleKind};
pub use player::{Player, DEFAULT_TRAIL_CAPACITY};
