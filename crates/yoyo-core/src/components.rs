//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::items::{CollectedStack, YoyoItem};
use crate::types::{BlockCoord, OwnerId};

/// Links a yoyo to the actor that threw it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YoyoOwner {
    pub owner: OwnerId,
}

/// Tether constraint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tether {
    /// Maximum distance from the owner's hand (blocks).
    pub length: f64,
    /// Weight used to scale the spring response.
    pub weight: f64,
}

/// Remaining active ticks. -1 is unlimited and sticky.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DurationBudget {
    pub remaining: i32,
}

/// Lifecycle state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YoyoStatus {
    pub state: YoyoState,
    /// Tick at which the current state began.
    pub state_start_tick: u64,
    /// Set when the yoyo starts retracting.
    pub retract_cause: Option<RetractCause>,
}

/// Drop collection buffer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collector {
    /// Collecting enchantment level; 0 disables collection.
    pub level: u32,
    pub stack: CollectedStack,
    /// Blocks broken this tick whose drops are still to be gathered.
    pub marked_blocks: BTreeSet<BlockCoord>,
}

/// Cosmetic swing/spin phase.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Spin {
    /// Radians, wraps at TAU.
    pub angle: f64,
}

/// Ticks until the yoyo may touch an entity again.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AttackCooldown {
    pub remaining: u32,
}

/// The thrown item and the interaction strategies chosen at throw time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loadout {
    pub item: YoyoItem,
    pub entity_interaction: EntityInteraction,
    pub block_interaction: BlockInteraction,
}
