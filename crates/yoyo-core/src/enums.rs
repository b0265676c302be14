//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a thrown yoyo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum YoyoState {
    /// Not in flight. Instances reaching this state are flushed and despawned.
    #[default]
    Idle,
    /// Outbound, swinging toward where the owner looks.
    Thrown,
    /// Being reeled back to the owner's hand.
    Returning,
}

/// Why a yoyo started retracting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetractCause {
    /// Duration budget ran out.
    DurationExpired,
    /// Distance from the hand exceeded the tether length.
    TetherExceeded,
    /// Owner let go of the throw action.
    Released,
    /// Owner disappeared from the host world.
    OwnerLost,
    /// The world session is shutting down.
    SessionEnded,
}

/// How the yoyo treats entities it touches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityInteraction {
    /// Melee attack.
    #[default]
    Attack,
    /// Shear shearable targets, attack everything else.
    Shear,
}

/// How the yoyo treats blocks it touches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockInteraction {
    /// Pass through blocks without interacting.
    Ignore,
    /// Shear shearable blocks and break simple plants.
    Garden,
    /// Harvest fully grown crops and replant them.
    Harvest,
    /// Harvest crops, then garden anything else.
    #[default]
    Tend,
}

impl BlockInteraction {
    pub fn interacts(self) -> bool {
        self != BlockInteraction::Ignore
    }

    pub fn harvests(self) -> bool {
        matches!(self, BlockInteraction::Harvest | BlockInteraction::Tend)
    }

    pub fn gardens(self) -> bool {
        matches!(self, BlockInteraction::Garden | BlockInteraction::Tend)
    }
}

/// Creature family, used for enchantment damage bonuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureKind {
    #[default]
    Undefined,
    Undead,
    Arthropod,
    Illager,
    Water,
}
