//! Melee resolution when a yoyo strikes an entity.

use glam::DVec3;

use yoyo_core::components::Loadout;
use yoyo_core::constants::*;
use yoyo_core::enums::CreatureKind;
use yoyo_core::events::YoyoEvent;
use yoyo_core::types::{EntityId, OwnerId};

use crate::host::{DamageSource, EntityCapabilities, HostContext, OwnerActor};
use crate::systems::interaction::wear;

/// Result of one strike, before it is turned into an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub damage: f32,
    pub critical: bool,
    pub applied: bool,
    pub dealt: f32,
}

/// A falling owner who is not sprinting, climbing, swimming, impaired or
/// mounted lands a critical hit on living targets.
pub fn is_critical(owner: &dyn OwnerActor, target_living: bool) -> bool {
    owner.is_airborne()
        && !owner.is_climbing()
        && !owner.is_swimming()
        && !owner.is_impaired()
        && !owner.is_riding()
        && !owner.is_sprinting()
        && target_living
}

/// Strike a target. Returns `None` when no attack was attempted.
pub fn attack_entity(
    target: EntityId,
    caps: &EntityCapabilities,
    loadout: &mut Loadout,
    owner_id: OwnerId,
    ctx: &mut HostContext<'_>,
    events: &mut Vec<YoyoEvent>,
) -> Option<Strike> {
    if !ctx.combat.allow_attack(owner_id, target) || !caps.attackable {
        return None;
    }

    let enchantments = loadout.item.enchantments;
    let creature = if caps.living {
        caps.creature
    } else {
        CreatureKind::Undefined
    };

    let mut damage = BASE_ATTACK_DAMAGE + loadout.item.stats.attack_damage;
    let modifier = enchantments.damage_bonus(creature);
    if damage <= 0.0 && modifier <= 0.0 {
        return None;
    }

    let critical = is_critical(&*ctx.owner, caps.living);
    if critical {
        damage *= CRITICAL_MULTIPLIER;
    }
    damage += modifier;

    let health_before = if caps.living {
        ctx.combat.health(target).unwrap_or(0.0)
    } else {
        0.0
    };

    // Fire aspect sets the target alight before the hit so burn-aware
    // damage handling sees it.
    let mut ignited = false;
    if caps.living && enchantments.fire_aspect > 0 && !ctx.combat.is_burning(target) {
        ignited = true;
        ctx.combat.set_fire(target, 1);
    }

    let applied = ctx
        .combat
        .resolve_attack(target, damage, DamageSource::yoyo(owner_id, critical));

    let mut dealt = 0.0;
    if applied {
        if enchantments.knockback > 0 {
            let look = ctx.owner.look_vector();
            let direction = DVec3::new(look.x, 0.0, look.z).normalize_or_zero();
            ctx.combat.knock_back(
                target,
                enchantments.knockback as f32 * KNOCKBACK_PER_LEVEL,
                direction,
            );
        }

        ctx.combat.apply_on_hit_effects(owner_id, target);

        if caps.living {
            wear(&mut *ctx.owner, loadout, HIT_DURABILITY_COST);
            let health_after = ctx.combat.health(target).unwrap_or(0.0);
            dealt = (health_before - health_after).max(0.0);
            if enchantments.fire_aspect > 0 {
                ctx.combat
                    .set_fire(target, enchantments.fire_aspect * FIRE_SECS_PER_LEVEL);
            }
        }

        ctx.owner.add_exhaustion(HIT_EXHAUSTION);
    } else if ignited {
        ctx.combat.extinguish(target);
    }

    events.push(YoyoEvent::EntityHit {
        owner: owner_id,
        target,
        damage,
        critical,
        applied,
        dealt,
    });

    Some(Strike {
        damage,
        critical,
        applied,
        dealt,
    })
}
