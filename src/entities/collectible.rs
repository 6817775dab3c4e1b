//! Gems and power-ups scattered through a level

use serde::{Deserialize, Serialize};

use crate::world::Position;

/// What a collectible does when picked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Must all be collected before the exit opens
    Gem,
    /// Optional; grants bonus moves and a burst of power mode
    Power,
}

impl CollectibleKind {
    pub fn name(&self) -> &'static str {
        match self {
            CollectibleKind::Gem => "gem",
            CollectibleKind::Power => "power-up",
        }
    }

    /// Whether the level can only be completed once every one of these is gone
    pub fn is_required(&self) -> bool {
        match self {
            CollectibleKind::Gem => true,
            CollectibleKind::Power => false,
        }
    }
}

/// A single pickup lying on a path cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collectible {
    pub position: Position,
    pub kind: CollectibleKind,
    pub value: u32,
}

impl Collectible {
    pub fn new(position: Position, kind: CollectibleKind, value: u32) -> Self {
        Self {
            position,
            kind,
            value,
        }
    }

    pub fn gem(position: Position, value: u32) -> Self {
        Self::new(position, CollectibleKind::Gem, value)
    }

    pub fn power(position: Position, value: u32) -> Self {
        Self::new(position, CollectibleKind::Power, value)
    }
}
