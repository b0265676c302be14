//! Tether simulation for yoyos.
//!
//! Owns the hecs ECS world of in-flight yoyos, advances them one tick at a
//! time against an abstract host, and produces `SessionSnapshot`s.

pub mod config;
pub mod error;
pub mod fsm;
pub mod host;
pub mod sandbox;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use session::TetherSession;
pub use yoyo_core as core;
