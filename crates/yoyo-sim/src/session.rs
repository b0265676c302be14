//! Tether session: the core of the simulation.
//!
//! `TetherSession` owns the hecs ECS world of in-flight yoyos, handles throw
//! and release requests, advances every yoyo once per tick against the host,
//! and produces `SessionSnapshot`s. It never touches host objects directly,
//! which keeps it headless and deterministic under test.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use yoyo_core::components::{Collector, DurationBudget, YoyoStatus};
use yoyo_core::constants::{THROW_EXHAUSTION, UNLIMITED_DURATION};
use yoyo_core::enums::{RetractCause, YoyoState};
use yoyo_core::events::YoyoEvent;
use yoyo_core::items::{ItemStack, YoyoItem};
use yoyo_core::state::{SessionSnapshot, YoyoView};
use yoyo_core::types::{BlockCoord, OwnerId, Position, SimTime};

use crate::config::{SessionConfig, TetherTuning};
use crate::error::ThrowError;
use crate::host::{Host, HostContext};
use crate::systems;
use crate::systems::flush::FlushOutcome;
use crate::world_setup;

/// The tether session. Owns the ECS world and all simulation state.
pub struct TetherSession {
    world: World,
    /// At most one yoyo per owner.
    instances: BTreeMap<OwnerId, Entity>,
    time: SimTime,
    tuning: TetherTuning,
    rng: ChaCha8Rng,
    despawn_buffer: Vec<Entity>,
    events: Vec<YoyoEvent>,
}

impl TetherSession {
    /// Start a new session with the given config.
    pub fn new(config: SessionConfig) -> Self {
        tracing::debug!(seed = config.seed, "tether session started");
        Self {
            world: World::new(),
            instances: BTreeMap::new(),
            time: SimTime::default(),
            tuning: config.tuning,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Throw a yoyo for an owner.
    pub fn try_throw(
        &mut self,
        host: &mut dyn Host,
        owner: OwnerId,
        item: YoyoItem,
    ) -> Result<(), ThrowError> {
        if self.instances.contains_key(&owner) {
            return Err(ThrowError::AlreadyActive);
        }
        if !item.is_usable() {
            return Err(ThrowError::ItemExhausted);
        }
        let mut ctx = host.context(owner).ok_or(ThrowError::OwnerUnavailable)?;

        let hand = ctx.owner.position();
        let look = ctx.owner.look_vector();
        ctx.owner.add_exhaustion(THROW_EXHAUSTION);

        let entity = world_setup::spawn_yoyo(
            &mut self.world,
            owner,
            item,
            hand,
            look,
            &self.tuning,
            self.time.tick,
        );
        self.instances.insert(owner, entity);

        tracing::info!(owner = owner.0, tick = self.time.tick, "yoyo thrown");
        self.events.push(YoyoEvent::Thrown { owner });
        Ok(())
    }

    /// Throw a yoyo for an owner. A rejected throw is a no-op apart from a
    /// `ThrowRejected` event.
    pub fn throw(&mut self, host: &mut dyn Host, owner: OwnerId, item: YoyoItem) -> bool {
        match self.try_throw(host, owner, item) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(owner = owner.0, %err, "throw rejected");
                self.events.push(YoyoEvent::ThrowRejected {
                    owner,
                    reason: err.reason(),
                });
                false
            }
        }
    }

    /// Ask a thrown yoyo to come back. Returns false if there was nothing to
    /// release.
    pub fn release(&mut self, owner: OwnerId) -> bool {
        let Some(&entity) = self.instances.get(&owner) else {
            return false;
        };
        systems::lifecycle::retract(
            &mut self.world,
            entity,
            RetractCause::Released,
            self.time.tick,
            &mut self.events,
        )
    }

    /// Make an active yoyo's duration unlimited.
    pub fn make_frictionless(&mut self, owner: OwnerId) -> bool {
        let Some(&entity) = self.instances.get(&owner) else {
            return false;
        };
        match self.world.query_one_mut::<&mut DurationBudget>(entity) {
            Ok(budget) => {
                budget.remaining = UNLIMITED_DURATION;
                true
            }
            Err(_) => false,
        }
    }

    /// Offer drops the host produced for a block. A collecting yoyo that
    /// broke the block takes them; anything not taken is handed back for the
    /// host to spawn.
    pub fn claim_block_drops(
        &mut self,
        coord: BlockCoord,
        drops: Vec<ItemStack>,
    ) -> Vec<ItemStack> {
        for &entity in self.instances.values() {
            if let Ok(collector) = self.world.query_one_mut::<&mut Collector>(entity) {
                if collector.marked_blocks.contains(&coord) {
                    return systems::drops::claim(collector, coord, drops);
                }
            }
        }
        drops
    }

    /// Advance every yoyo by one tick and return the resulting snapshot.
    pub fn tick(&mut self, host: &mut dyn Host) -> SessionSnapshot {
        let now = self.time.tick;
        let instances: Vec<(OwnerId, Entity)> =
            self.instances.iter().map(|(o, e)| (*o, *e)).collect();

        for (owner, entity) in instances {
            match host.context(owner) {
                Some(mut ctx) => self.step(owner, entity, &mut ctx, now),
                None => self.lose_owner(host, owner, entity, now),
            }
        }

        self.despawn_finished();
        self.time.advance();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, events)
    }

    /// Retract and flush every yoyo, then clear the session. Returns the
    /// events raised on the way out.
    pub fn end_session(&mut self, host: &mut dyn Host) -> Vec<YoyoEvent> {
        let now = self.time.tick;
        let instances: Vec<(OwnerId, Entity)> =
            self.instances.iter().map(|(o, e)| (*o, *e)).collect();

        for (owner, entity) in instances {
            systems::lifecycle::retract(
                &mut self.world,
                entity,
                RetractCause::SessionEnded,
                now,
                &mut self.events,
            );
            let stacks = systems::flush::take_collected(&mut self.world, entity);
            let outcome = match host.context(owner) {
                Some(ctx) => systems::flush::deliver_to_owner(stacks, ctx.owner, ctx.world),
                None => systems::flush::spill(stacks, self.position_of(entity), host.world()),
            };
            self.finish(owner, entity, outcome, now);
        }

        self.despawn_finished();
        self.instances.clear();
        tracing::info!(tick = now, "tether session ended");
        std::mem::take(&mut self.events)
    }

    /// Current state without advancing time. Carries no events.
    pub fn snapshot(&self) -> SessionSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.time, Vec::new())
    }

    pub fn is_active(&self, owner: OwnerId) -> bool {
        self.instances.contains_key(&owner)
    }

    pub fn active_count(&self) -> usize {
        self.instances.len()
    }

    /// Lifecycle state of an owner's yoyo, `None` if nothing is out.
    pub fn state_of(&self, owner: OwnerId) -> Option<YoyoState> {
        let entity = *self.instances.get(&owner)?;
        self.world
            .get::<&YoyoStatus>(entity)
            .ok()
            .map(|status| status.state)
    }

    pub fn view(&self, owner: OwnerId) -> Option<YoyoView> {
        let entity = *self.instances.get(&owner)?;
        systems::snapshot::build_view(&self.world, entity)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn tuning(&self) -> &TetherTuning {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Run one yoyo through a tick, in order: integrate, lifecycle,
    /// collision, interaction, spin, cooldown.
    fn step(&mut self, owner: OwnerId, entity: Entity, ctx: &mut HostContext<'_>, now: u64) {
        // Marks only live until the host has had one chance to claim drops.
        systems::interaction::clear_marks(&mut self.world, entity);

        let hand = ctx.owner.position();
        let look = ctx.owner.look_vector();

        let Some(sweep) =
            systems::tether::integrate(&mut self.world, entity, hand, look, &self.tuning)
        else {
            return;
        };

        let state = systems::lifecycle::advance(
            &mut self.world,
            entity,
            hand,
            self.time,
            &self.tuning,
            &mut self.events,
        );
        if state == Some(YoyoState::Idle) {
            let stacks = systems::flush::take_collected(&mut self.world, entity);
            let outcome =
                systems::flush::deliver_to_owner(stacks, &mut *ctx.owner, &mut *ctx.world);
            self.finish(owner, entity, outcome, now);
            return;
        }

        let target = systems::collision::detect(
            &mut self.world,
            entity,
            &sweep,
            &*ctx.world,
            ctx.owner.entity_id(),
        );
        if let Some(target) = target {
            if let Err(err) = systems::interaction::dispatch(
                &mut self.world,
                entity,
                target,
                ctx,
                &mut self.rng,
                &mut self.events,
            ) {
                tracing::debug!(owner = owner.0, ?target, %err, "interaction skipped");
                self.events.push(YoyoEvent::StaleTarget { owner });
            }
        }

        systems::tether::advance_spin(&mut self.world, entity, sweep.length());
        systems::interaction::cool_down(&mut self.world, entity);
    }

    /// The owner left the world: drop the yoyo's haul where it is.
    fn lose_owner(&mut self, host: &mut dyn Host, owner: OwnerId, entity: Entity, now: u64) {
        tracing::warn!(owner = owner.0, "owner lost with yoyo out");
        self.events.push(YoyoEvent::OwnerLost { owner });
        systems::lifecycle::retract(
            &mut self.world,
            entity,
            RetractCause::OwnerLost,
            now,
            &mut self.events,
        );

        let stacks = systems::flush::take_collected(&mut self.world, entity);
        let outcome = systems::flush::spill(stacks, self.position_of(entity), host.world());
        self.finish(owner, entity, outcome, now);
    }

    /// Mark a yoyo idle after its flush and report the outcome.
    fn finish(&mut self, owner: OwnerId, entity: Entity, outcome: FlushOutcome, now: u64) {
        if let Ok(status) = self.world.query_one_mut::<&mut YoyoStatus>(entity) {
            status.state = YoyoState::Idle;
            status.state_start_tick = now;
        }
        tracing::info!(
            owner = owner.0,
            delivered = outcome.delivered,
            overflow = outcome.overflow,
            "yoyo returned"
        );
        self.events.push(YoyoEvent::Returned {
            owner,
            delivered: outcome.delivered,
            overflow: outcome.overflow,
        });
    }

    fn despawn_finished(&mut self) {
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        let world = &self.world;
        self.instances.retain(|_, entity| world.contains(*entity));
    }

    fn position_of(&self, entity: Entity) -> Position {
        self.world
            .get::<&Position>(entity)
            .map(|pos| *pos)
            .unwrap_or_default()
    }
}
