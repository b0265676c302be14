//! Events emitted by the simulation for host feedback (sounds, particles, stats).

use serde::{Deserialize, Serialize};

use crate::enums::RetractCause;
use crate::items::ItemStack;
use crate::types::{BlockCoord, EntityId, OwnerId};

/// Why a throw was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    AlreadyActive,
    ItemExhausted,
    OwnerUnavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum YoyoEvent {
    /// A new yoyo left the owner's hand.
    Thrown { owner: OwnerId },
    /// A throw attempt did nothing.
    ThrowRejected { owner: OwnerId, reason: RejectReason },
    /// A yoyo started reeling back.
    Retracting { owner: OwnerId, cause: RetractCause },
    /// A yoyo was caught (or spilled) and removed.
    Returned {
        owner: OwnerId,
        /// Items merged into the owner's inventory.
        delivered: u64,
        /// Items that did not fit and were dropped in the world.
        overflow: u64,
    },
    /// Melee attack resolved.
    EntityHit {
        owner: OwnerId,
        target: EntityId,
        damage: f32,
        critical: bool,
        applied: bool,
        /// Health actually removed from a living target.
        dealt: f32,
    },
    /// A shearable entity was sheared.
    EntitySheared {
        owner: OwnerId,
        target: EntityId,
        drops: Vec<ItemStack>,
    },
    /// A plant or shearable block was cut down.
    BlockGardened { owner: OwnerId, block: BlockCoord },
    /// A ripe crop was harvested and replanted.
    CropHarvested { owner: OwnerId, block: BlockCoord },
    /// The collided target was gone by dispatch time.
    StaleTarget { owner: OwnerId },
    /// The owner vanished while the yoyo was out.
    OwnerLost { owner: OwnerId },
}
