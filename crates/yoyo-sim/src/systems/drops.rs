//! Drop routing: into the collector when collecting, otherwise into the world.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use yoyo_core::components::Collector;
use yoyo_core::constants::{BLOCK_DROP_SPREAD, ENTITY_DROP_HEIGHT};
use yoyo_core::items::ItemStack;
use yoyo_core::types::{BlockCoord, Position, Velocity};

use crate::host::WorldQuery;

/// Where uncollected drops appear.
#[derive(Debug, Clone, Copy)]
pub enum DropOrigin {
    /// Above an entity, popping out with a small random velocity.
    Entity(Position),
    /// Somewhere inside a block cell, at rest.
    Block(BlockCoord),
}

/// Route each drop into the collector, or spawn it as a world pickup.
pub fn route(
    collector: &mut Collector,
    drops: Vec<ItemStack>,
    origin: DropOrigin,
    world: &mut dyn WorldQuery,
    rng: &mut ChaCha8Rng,
) {
    for drop in drops.into_iter().filter(|d| !d.is_empty()) {
        if collector.level > 0 {
            collector.stack.push(drop);
        } else {
            spawn(world, drop, origin, rng);
        }
    }
}

/// Route drops from a block broken by this yoyo.
///
/// Drops of a marked block are gathered once and the mark is cleared. An empty
/// drop list leaves the mark in place so drops reported later through
/// `claim` still reach the collector.
pub fn gather_block_drops(
    collector: &mut Collector,
    coord: BlockCoord,
    drops: Vec<ItemStack>,
    world: &mut dyn WorldQuery,
    rng: &mut ChaCha8Rng,
) {
    if drops.is_empty() {
        return;
    }
    collector.marked_blocks.remove(&coord);
    route(collector, drops, DropOrigin::Block(coord), world, rng);
}

/// Absorb drops the host reports for a block. Returns whatever was not taken.
pub fn claim(collector: &mut Collector, coord: BlockCoord, drops: Vec<ItemStack>) -> Vec<ItemStack> {
    if !collector.marked_blocks.remove(&coord) || collector.level == 0 {
        return drops;
    }
    for drop in drops {
        collector.stack.push(drop);
    }
    Vec::new()
}

fn spawn(world: &mut dyn WorldQuery, stack: ItemStack, origin: DropOrigin, rng: &mut ChaCha8Rng) {
    match origin {
        DropOrigin::Entity(pos) => {
            let velocity = Velocity::new(
                (rng.gen::<f32>() - rng.gen::<f32>()) as f64 * 0.1,
                rng.gen::<f32>() as f64 * 0.05,
                (rng.gen::<f32>() - rng.gen::<f32>()) as f64 * 0.1,
            );
            world.spawn_pickup(pos.offset(0.0, ENTITY_DROP_HEIGHT, 0.0), stack, velocity);
        }
        DropOrigin::Block(coord) => {
            let inset = (1.0 - BLOCK_DROP_SPREAD) * 0.5;
            let dx = rng.gen::<f64>() * BLOCK_DROP_SPREAD + inset;
            let dy = rng.gen::<f64>() * BLOCK_DROP_SPREAD + inset;
            let dz = rng.gen::<f64>() * BLOCK_DROP_SPREAD + inset;
            world.spawn_pickup(coord.origin().offset(dx, dy, dz), stack, Velocity::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;

    use crate::sandbox::SandboxWorld;

    fn collector(level: u32) -> Collector {
        Collector {
            level,
            ..Default::default()
        }
    }

    #[test]
    fn test_collecting_keeps_drops_out_of_world() {
        let mut world = SandboxWorld::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut c = collector(1);

        route(
            &mut c,
            vec![ItemStack::new("wool", 2), ItemStack::new("wool", 1)],
            DropOrigin::Entity(Position::default()),
            &mut world,
            &mut rng,
        );
        assert_eq!(c.stack.total(), 3);
        assert!(world.pickups.is_empty());
    }

    #[test]
    fn test_block_drops_land_inside_cell() {
        let mut world = SandboxWorld::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut c = collector(0);
        let coord = BlockCoord::new(-3, 4, 7);

        route(
            &mut c,
            vec![ItemStack::new("seeds", 1), ItemStack::new("stick", 2)],
            DropOrigin::Block(coord),
            &mut world,
            &mut rng,
        );
        assert_eq!(world.pickups.len(), 2);
        for pickup in &world.pickups {
            assert_eq!(pickup.position.block(), coord);
        }
    }

    #[test]
    fn test_entity_drops_spawn_above_target() {
        let mut world = SandboxWorld::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut c = collector(0);

        route(
            &mut c,
            vec![ItemStack::new("wool", 1)],
            DropOrigin::Entity(Position::new(0.0, 2.0, 0.0)),
            &mut world,
            &mut rng,
        );
        let pickup = &world.pickups[0];
        assert_eq!(pickup.position.y, 2.0 + ENTITY_DROP_HEIGHT);
        assert!(pickup.velocity.y >= 0.0 && pickup.velocity.y <= 0.05);
    }

    #[test]
    fn test_claim_only_once_per_marked_block() {
        let coord = BlockCoord::new(1, 1, 1);
        let mut c = collector(1);
        c.marked_blocks.insert(coord);

        let left = claim(&mut c, coord, vec![ItemStack::new("berry", 3)]);
        assert!(left.is_empty());
        let left = claim(&mut c, coord, vec![ItemStack::new("berry", 3)]);
        assert_eq!(left, vec![ItemStack::new("berry", 3)]);
        assert_eq!(c.stack.total(), 3);
    }

    #[test]
    fn test_claim_without_collecting_returns_drops() {
        let coord = BlockCoord::new(1, 1, 1);
        let mut c = collector(0);
        c.marked_blocks.insert(coord);

        let left = claim(&mut c, coord, vec![ItemStack::new("berry", 3)]);
        assert_eq!(left.len(), 1);
        assert!(c.marked_blocks.is_empty());
    }

    #[test]
    fn test_empty_gather_keeps_mark() {
        let mut world = SandboxWorld::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let coord = BlockCoord::new(0, 0, 0);
        let mut c = collector(1);
        c.marked_blocks.insert(coord);

        gather_block_drops(&mut c, coord, Vec::new(), &mut world, &mut rng);
        assert!(c.marked_blocks.contains(&coord));
        gather_block_drops(&mut c, coord, vec![ItemStack::new("leaf", 1)], &mut world, &mut rng);
        assert!(c.marked_blocks.is_empty());
        assert_eq!(c.stack.total(), 1);
    }
}
