//! Core types and definitions for the yoyo tether simulation.
//!
//! This crate defines the vocabulary shared across the workspace:
//! geometric types, components, item descriptors, events, snapshots
//! and tuning constants. It has no dependency on any host engine.

pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod items;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
