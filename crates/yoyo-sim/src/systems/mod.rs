//! ECS systems that operate on the yoyo world each tick.
//!
//! Systems are free functions over `&mut World` and a single yoyo entity.
//! Host collaborators arrive through a `HostContext`; no system keeps state.

pub mod attack;
pub mod cleanup;
pub mod collision;
pub mod drops;
pub mod duration;
pub mod flush;
pub mod garden;
pub mod interaction;
pub mod lifecycle;
pub mod snapshot;
pub mod tether;
