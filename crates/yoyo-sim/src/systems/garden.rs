//! Shearing, gardening and harvesting.

use rand_chacha::ChaCha8Rng;

use yoyo_core::components::{Collector, Loadout};
use yoyo_core::constants::HIT_DURABILITY_COST;
use yoyo_core::events::YoyoEvent;
use yoyo_core::types::{BlockCoord, EntityId, OwnerId};

use crate::host::{BlockCapabilities, CropGrowth, EntityCapabilities, HostContext, Target};
use crate::systems::drops::{self, DropOrigin};
use crate::systems::interaction::{block_break_cost, wear};

/// Shear an entity that has something to shear.
#[allow(clippy::too_many_arguments)]
pub fn shear_entity(
    target: EntityId,
    caps: &EntityCapabilities,
    loadout: &mut Loadout,
    collector: &mut Collector,
    owner_id: OwnerId,
    ctx: &mut HostContext<'_>,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<YoyoEvent>,
) {
    let fortune = loadout.item.enchantments.fortune;
    let produced = ctx.world.on_sheared(Target::Entity(target), fortune);

    drops::route(
        collector,
        produced.clone(),
        DropOrigin::Entity(caps.position),
        &mut *ctx.world,
        rng,
    );
    wear(&mut *ctx.owner, loadout, HIT_DURABILITY_COST);

    events.push(YoyoEvent::EntitySheared {
        owner: owner_id,
        target,
        drops: produced,
    });
}

/// Apply the loadout's block strategy to a block.
///
/// Crops are only ever harvested, never cut down: an immature crop is left
/// alone even when the loadout also gardens.
#[allow(clippy::too_many_arguments)]
pub fn tend_block(
    coord: BlockCoord,
    caps: &BlockCapabilities,
    loadout: &mut Loadout,
    collector: &mut Collector,
    owner_id: OwnerId,
    ctx: &mut HostContext<'_>,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<YoyoEvent>,
) {
    let strategy = loadout.block_interaction;

    if let Some(crop) = caps.crop {
        if strategy.harvests() {
            harvest_crop(coord, crop, loadout, collector, owner_id, ctx, rng, events);
            return;
        }
    }

    if !strategy.gardens() {
        return;
    }

    let fortune = loadout.item.enchantments.fortune;
    if caps.shearable {
        // Drops are read before removal; a block that stays keeps them.
        let produced = ctx.world.on_sheared(Target::Block(coord), fortune);
        if !ctx.world.remove_block(coord, owner_id) {
            return;
        }
        drops::route(
            collector,
            produced,
            DropOrigin::Block(coord),
            &mut *ctx.world,
            rng,
        );
        wear(&mut *ctx.owner, loadout, block_break_cost(caps.hardness));
        events.push(YoyoEvent::BlockGardened {
            owner: owner_id,
            block: coord,
        });
    } else if caps.plant {
        wear(&mut *ctx.owner, loadout, block_break_cost(caps.hardness));
        if ctx.world.remove_block(coord, owner_id) {
            collector.marked_blocks.insert(coord);
            let produced = ctx.world.harvest_drops(coord, fortune);
            drops::gather_block_drops(collector, coord, produced, &mut *ctx.world, rng);
            events.push(YoyoEvent::BlockGardened {
                owner: owner_id,
                block: coord,
            });
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn harvest_crop(
    coord: BlockCoord,
    crop: CropGrowth,
    loadout: &Loadout,
    collector: &mut Collector,
    owner_id: OwnerId,
    ctx: &mut HostContext<'_>,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<YoyoEvent>,
) {
    if !crop.is_mature() {
        return;
    }

    collector.marked_blocks.insert(coord);
    let produced = ctx
        .world
        .harvest_drops(coord, loadout.item.enchantments.fortune);
    drops::gather_block_drops(collector, coord, produced, &mut *ctx.world, rng);
    ctx.world.reset_growth_stage(coord);

    events.push(YoyoEvent::CropHarvested {
        owner: owner_id,
        block: coord,
    });
}
