//! Simulation constants and tuning parameters.
//!
//! All rates are per tick. Distances are in blocks.

/// Unlimited duration budget ("frictionless").
pub const UNLIMITED_DURATION: i32 = -1;

// --- Tether physics ---

/// Spring stiffness pulling a thrown yoyo toward its swing target.
pub const THROWN_STIFFNESS: f64 = 0.25;

/// Spring stiffness pulling a returning yoyo toward the owner's hand.
pub const RETURN_STIFFNESS: f64 = 0.45;

/// Fraction of velocity removed every tick.
pub const DAMPING: f64 = 0.5;

/// Upper bound on effective stiffness after weight scaling.
pub const MAX_STIFFNESS: f64 = 1.5;

/// Lower bound on weight used for stiffness scaling.
pub const MIN_WEIGHT: f64 = 0.25;

/// Maximum yoyo speed (blocks per tick).
pub const MAX_SPEED: f64 = 1.5;

/// Initial speed along the look vector when thrown.
pub const THROW_SPEED: f64 = 0.6;

/// Swing target distance as a fraction of tether length.
/// Kept below 1.0 so spring overshoot stays inside the tether.
pub const THROWN_REACH: f64 = 0.8;

/// Margin kept between a thrown yoyo and the end of its tether.
pub const TETHER_SLACK: f64 = 1e-6;

/// Distance from the hand at which a returning yoyo counts as caught.
pub const RETURN_EPSILON: f64 = 0.5;

/// Ticks after which an unfinished retraction completes anyway.
pub const RETURN_TIMEOUT_TICKS: u64 = 200;

/// Radius of the yoyo body used for entity hit tests.
pub const YOYO_RADIUS: f64 = 0.25;

/// Spin advance per block travelled (radians).
pub const SPIN_PER_BLOCK: f64 = 2.0;

// --- Combat ---

/// Base attack damage of an unarmed actor; the yoyo adds its own damage on top.
pub const BASE_ATTACK_DAMAGE: f32 = 1.0;

/// Damage multiplier for a critical hit.
pub const CRITICAL_MULTIPLIER: f32 = 1.5;

/// Knockback strength per enchantment level.
pub const KNOCKBACK_PER_LEVEL: f32 = 0.5;

/// Seconds of fire per fire-aspect level applied after a hit.
pub const FIRE_SECS_PER_LEVEL: u32 = 4;

/// Exhaustion added to the owner on a successful hit.
pub const HIT_EXHAUSTION: f32 = 0.3;

/// Exhaustion added to the owner on a throw.
pub const THROW_EXHAUSTION: f32 = 0.05;

/// Bonus damage per sharpness level (all creatures).
pub const SHARPNESS_BONUS_BASE: f32 = 1.0;
pub const SHARPNESS_BONUS_PER_LEVEL: f32 = 0.5;

/// Bonus damage per smite / bane-of-arthropods level.
pub const CREATURE_BONUS_PER_LEVEL: f32 = 2.5;

/// Default ticks between entity interactions.
pub const DEFAULT_ATTACK_INTERVAL: u32 = 10;

// --- Durability ---

/// Durability cost of a successful entity hit or shear.
pub const HIT_DURABILITY_COST: u32 = 1;

/// Durability cost of breaking a block with zero hardness.
pub const SOFT_BLOCK_DURABILITY_COST: u32 = 1;

/// Durability cost of breaking a block with nonzero hardness.
pub const HARD_BLOCK_DURABILITY_COST: u32 = 2;

// --- Drops ---

/// Height above an entity's feet at which shear drops spawn.
pub const ENTITY_DROP_HEIGHT: f64 = 1.0;

/// Spread of the random in-block offset for gardened drops.
pub const BLOCK_DROP_SPREAD: f64 = 0.7;

/// Collecting level of an unbreakable (creative) yoyo.
pub const CREATIVE_COLLECTING_LEVEL: u32 = i32::MAX as u32 / 2;
