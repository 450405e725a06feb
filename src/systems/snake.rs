//! Snake chain system and the operations other code uses to drive a snake.
//!
//! # System Flow
//!
//! Each frame [`snake_system`], for every snake that is not `Stopped`:
//!
//! 1. Resolves a pending bounce: `Reverting` flips the velocity and returns to `Moving`
//! 2. Drags the body: from the tail down to index 1, each part takes the
//!    position its predecessor had before this tick
//! 3. Advances the head by `velocity * delta`
//!
//! Positions are copied in descending index order, so every source position
//! is read before it is overwritten. [`Bounds`] follow every moved part.
//!
//! # Operations
//!
//! [`SnakeControl`] bundles the queries needed to grow, shrink, speed up,
//! teleport, revert, steer and kill snakes. It is a [`SystemParam`], so the
//! collision system uses it directly and
//! [`Simulation`](crate::simulation::Simulation) reaches it through a
//! `SystemState`.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use glam::Vec2;
use log::{debug, info, warn};

use crate::components::bounds::Bounds;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::components::snake::{ChainId, Direction, FruitCount, Segment, SnakeChain, SnakeState};
use crate::components::spin::Spin;
use crate::components::timeout::{DeferredAction, Timeout};
use crate::components::zindex::ZIndex;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::rng::SimRng;
use crate::resources::worldtime::WorldTime;

/// Idle spin of a body piece, degrees per second.
pub const SEGMENT_SPIN: f32 = 10.0;

type PositionQuery<'w, 's> = Query<'w, 's, (&'static mut MapPosition, Option<&'static mut Bounds>)>;

/// Advance every active snake by one tick.
pub fn snake_system(
    mut snakes: Query<(&SnakeChain, &mut SnakeState, &mut RigidBody)>,
    mut positions: PositionQuery,
    time: Res<WorldTime>,
) {
    let dt = time.delta;
    for (chain, mut state, mut body) in snakes.iter_mut() {
        match *state {
            SnakeState::Stopped => continue,
            SnakeState::Reverting => {
                body.reverse();
                *state = SnakeState::Moving;
            }
            SnakeState::Moving => {}
        }
        drag_body(chain.parts(), &mut positions);
        let head = chain.head();
        let (mut position, bounds) = positions
            .get_mut(head)
            .expect("snake head without MapPosition");
        position.pos += body.velocity * dt;
        if let Some(mut bounds) = bounds {
            bounds.sync(position.pos);
        }
    }
}

/// Part `i` moves to where part `i - 1` is, for `i` from the tail down to 1.
fn drag_body(parts: &[Entity], positions: &mut PositionQuery) {
    for i in (1..parts.len()).rev() {
        let (leader, _) = positions
            .get(parts[i - 1])
            .expect("snake part without MapPosition");
        let target = leader.pos;
        let (mut position, bounds) = positions
            .get_mut(parts[i])
            .expect("snake part without MapPosition");
        position.pos = target;
        if let Some(mut bounds) = bounds {
            bounds.sync(target);
        }
    }
}

/// Queries and resources needed to apply gameplay operations to snakes.
///
/// Structural changes (spawning a grown segment, despawning the tail,
/// stripping components on death) go through [`Commands`] and become visible
/// at the next sync point. Component values (state, velocity, positions,
/// chain order, counters) change immediately.
#[derive(SystemParam)]
pub struct SnakeControl<'w, 's> {
    commands: Commands<'w, 's>,
    chains: Query<'w, 's, (Entity, &'static mut SnakeChain)>,
    states: Query<'w, 's, &'static mut SnakeState>,
    bodies: Query<'w, 's, (Entity, &'static mut RigidBody)>,
    positions: PositionQuery<'w, 's>,
    counts: Query<'w, 's, &'static mut FruitCount>,
    timeouts: Query<'w, 's, &'static Timeout>,
    config: Res<'w, GameConfig>,
    game_state: ResMut<'w, GameState>,
    rng: ResMut<'w, SimRng>,
}

impl<'w, 's> SnakeControl<'w, 's> {
    /// Deferred command queue shared with the caller.
    pub fn commands(&mut self) -> &mut Commands<'w, 's> {
        &mut self.commands
    }

    pub fn chain_id(&self, creature: Entity) -> Option<ChainId> {
        self.chains.get(creature).ok().map(|(_, chain)| chain.id())
    }

    pub fn chain_len(&self, creature: Entity) -> Option<usize> {
        self.chains.get(creature).ok().map(|(_, chain)| chain.len())
    }

    pub fn state(&self, creature: Entity) -> Option<SnakeState> {
        self.states.get(creature).ok().copied()
    }

    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.positions.get(entity).ok().map(|(position, _)| position.pos)
    }

    /// Append a new segment at the end of the chain.
    ///
    /// The segment is spawned on top of the current tail and does not move on
    /// this tick; the next [`snake_system`] run places it where the old tail
    /// was, so the body looks continuous. Returns the new segment.
    pub fn grow(&mut self, creature: Entity) -> Option<Entity> {
        let Ok((_, mut chain)) = self.chains.get_mut(creature) else {
            warn!("grow: {:?} has no snake chain", creature);
            return None;
        };
        // The tail may itself be a segment spawned earlier in this pass
        let anchor = chain
            .parts()
            .iter()
            .rev()
            .find_map(|part| self.positions.get(*part).ok().map(|(p, _)| p.pos))
            .unwrap_or_default();
        let segment = self
            .commands
            .spawn((
                Segment,
                MapPosition::from_vec(anchor),
                Bounds::new(self.config.segment_width, self.config.segment_height).at(anchor),
                Rotation::default(),
                Spin::new(SEGMENT_SPIN),
                ZIndex::PIECE,
            ))
            .id();
        chain.push(segment);
        debug!("{:?} grew to {} parts", creature, chain.len());
        Some(segment)
    }

    /// Detach and despawn the last segment.
    ///
    /// # Panics
    /// Panics if the chain only holds the head.
    pub fn remove_tail(&mut self, creature: Entity) -> Option<Entity> {
        let Ok((_, mut chain)) = self.chains.get_mut(creature) else {
            warn!("remove_tail: {:?} has no snake chain", creature);
            return None;
        };
        let tail = chain.pop_tail();
        self.commands.entity(tail).try_despawn();
        debug!("{:?} shrank to {} parts", creature, chain.len());
        Some(tail)
    }

    /// Multiply the head velocity by the configured speed multiplier.
    pub fn increase_speed(&mut self, creature: Entity) {
        let factor = self.config.speed_multiplier;
        match self.bodies.get_mut(creature) {
            Ok((_, mut body)) => body.scale_speed(factor),
            Err(_) => warn!("increase_speed: {:?} has no RigidBody", creature),
        }
    }

    /// Put the head at `target`. Velocity and body segments are left alone,
    /// so the body catches up over the following ticks.
    pub fn teleport(&mut self, creature: Entity, target: Vec2) {
        match self.positions.get_mut(creature) {
            Ok((mut position, bounds)) => {
                position.pos = target;
                if let Some(mut bounds) = bounds {
                    bounds.sync(target);
                }
            }
            Err(_) => warn!("teleport: {:?} has no MapPosition", creature),
        }
    }

    /// Teleport onto the position of `exit`. A missing exit is a no-op.
    pub fn teleport_to(&mut self, creature: Entity, exit: Entity) -> bool {
        let Some(target) = self.position(exit) else {
            debug!("teleport exit {:?} is gone, ignoring", exit);
            return false;
        };
        self.teleport(creature, target);
        true
    }

    /// Ask the snake to reverse on its next tick.
    ///
    /// Ignored unless `chain` is the creature's current chain and the snake
    /// is `Moving`. Returns whether the request was taken.
    pub fn revert(&mut self, creature: Entity, chain: ChainId) -> bool {
        if self.chain_id(creature) != Some(chain) {
            debug!("revert: stale chain {:?} for {:?}", chain, creature);
            return false;
        }
        match self.states.get_mut(creature) {
            Ok(mut state) => state.request_revert(),
            Err(_) => false,
        }
    }

    /// Point the snake along `direction`, keeping its current speed.
    pub fn steer(&mut self, creature: Entity, direction: Direction) {
        if let Ok((_, mut body)) = self.bodies.get_mut(creature) {
            let speed = body.speed();
            body.set_velocity(direction.unit() * speed);
        }
    }

    /// Count an eaten fruit. Returns the new total.
    pub fn record_fruit(&mut self, creature: Entity) -> Option<u32> {
        let mut count = self.counts.get_mut(creature).ok()?;
        count.eaten += 1;
        if count.goal > 0 && count.eaten == count.goal {
            info!("{:?} reached the fruit goal of {}", creature, count.goal);
        }
        Some(count.eaten)
    }

    /// Attach `timeout` to `entity`, replacing a pending one unless the
    /// pending one is final.
    pub fn arm_timeout(&mut self, entity: Entity, timeout: Timeout) -> bool {
        if self
            .timeouts
            .get(entity)
            .is_ok_and(|pending| !pending.is_replaceable())
        {
            debug!("{:?} already has a final timeout pending", entity);
            return false;
        }
        self.commands.entity(entity).try_insert(timeout);
        true
    }

    /// Wall hit: stop the world and schedule game over.
    ///
    /// Every snake is stopped and loses its chain, every moving entity loses
    /// its [`RigidBody`], all former chain parts get a random [`Spin`], and a
    /// [`DeferredAction::GameOver`] timeout is armed on `creature`. Runs once
    /// per round; returns false if the round is already ending.
    pub fn kill(&mut self, creature: Entity) -> bool {
        if !self.game_state.is_playing() {
            debug!("kill: round already ending, ignoring {:?}", creature);
            return false;
        }
        info!("{:?} hit a wall", creature);
        self.game_state.set(GameStates::Dying);

        let (min, max) = (self.config.death_spin_min, self.config.death_spin_max);
        for (entity, chain) in self.chains.iter() {
            for part in chain.parts() {
                let spin = self.rng.sign() * self.rng.range_f32(min, max);
                self.commands.entity(*part).try_insert(Spin::new(spin));
            }
            if let Ok(mut state) = self.states.get_mut(entity) {
                *state = SnakeState::Stopped;
            }
            self.commands.entity(entity).try_remove::<SnakeChain>();
        }
        for (entity, _) in self.bodies.iter() {
            self.commands.entity(entity).try_remove::<RigidBody>();
        }

        let delay = self.config.game_over_delay;
        self.arm_timeout(creature, Timeout::new(delay, DeferredAction::GameOver));
        true
    }
}
