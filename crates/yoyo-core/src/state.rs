//! Session snapshot — the visible state handed to the host after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{RetractCause, YoyoState};
use crate::events::YoyoEvent;
use crate::items::ItemStack;
use crate::types::{OwnerId, Position, SimTime, Velocity};

/// Complete session state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub time: SimTime,
    /// Active yoyos, ordered by owner.
    pub yoyos: Vec<YoyoView>,
    /// Events raised since the previous snapshot.
    pub events: Vec<YoyoEvent>,
}

/// One active yoyo, as a renderer or HUD would need it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoyoView {
    pub owner: OwnerId,
    pub state: YoyoState,
    pub retract_cause: Option<RetractCause>,
    pub position: Position,
    pub velocity: Velocity,
    pub tether_length: f64,
    /// -1 = unlimited.
    pub duration_remaining: i32,
    pub collecting: bool,
    pub collected: Vec<ItemStack>,
    pub spin: f64,
}
