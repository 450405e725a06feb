//! Frame-stepped simulation facade.
//!
//! [`Simulation`] owns the ECS [`World`], the per-frame [`Schedule`] and the
//! receiving end of the feedback channel. It exposes the registry operations
//! (create, attach, get, remove, query) and the snake operations to code that
//! lives outside the schedule, such as the scene loader, input handling or
//! tests.
//!
//! # Frame
//!
//! [`Simulation::update`] advances [`WorldTime`] and runs, in this order:
//!
//! 1. [`movement`] for free movers
//! 2. [`snake_system`] for snake chains
//! 3. [`collision_system`], whose effects are applied at the following sync point
//! 4. [`update_timeouts`]
//! 5. [`spin_system`]
//! 6. Feedback forwarding to the channel
//!
//! # Example
//!
//! ```ignore
//! let mut sim = Simulation::new(GameConfig::new());
//! let scene = Scene::load_from_file("level1.json")?;
//! spawn_scene(sim.world_mut(), &scene, &config)?;
//! loop {
//!     sim.update(1.0 / 60.0);
//!     sim.dispatch_feedback(&mut collaborators);
//! }
//! ```

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::query::QueryFilter;
use bevy_ecs::system::SystemState;
use crossbeam_channel::Receiver;
use glam::Vec2;
use log::{debug, info, warn};

use crate::components::mapposition::MapPosition;
use crate::components::persistent::Persistent;
use crate::components::snake::{ChainId, Direction, Player, SnakeChain};
use crate::components::timeout::Timeout;
use crate::events::feedback::{Collaborators, FeedbackCmd};
use crate::events::platform::observe_platform_hit;
use crate::events::timeout::observe_timeout;
use crate::resources::chainids::ChainIds;
use crate::resources::feedback::setup_feedback;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::rng::SimRng;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::collision_system;
use crate::systems::feedback::{forward_feedback_cmds, update_feedback_cmds};
use crate::systems::movement::movement;
use crate::systems::snake::{SnakeControl, snake_system};
use crate::systems::spin::spin_system;
use crate::systems::time::update_world_time;
use crate::systems::timeout::update_timeouts;

pub struct Simulation {
    world: World,
    schedule: Schedule,
    feedback_rx: Receiver<FeedbackCmd>,
}

impl Simulation {
    /// Build the world, register observers and initialize the schedule.
    pub fn new(config: GameConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(GameState::new());
        world.insert_resource(SimRng::seeded(config.seed));
        world.insert_resource(ChainIds::default());
        world.insert_resource(config);
        let feedback_rx = setup_feedback(&mut world);

        world.spawn((Observer::new(observe_platform_hit), Persistent));
        world.spawn((Observer::new(observe_timeout), Persistent));
        world.flush();

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                movement,
                snake_system,
                collision_system,
                update_timeouts,
                spin_system,
                forward_feedback_cmds,
                update_feedback_cmds,
            )
                .chain(),
        );
        schedule
            .initialize(&mut world)
            .expect("Failed to initialize schedule");

        Simulation {
            world,
            schedule,
            feedback_rx,
        }
    }

    /// Advance the simulation by `dt` unscaled seconds.
    pub fn update(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    // --- Registry ---

    pub fn create_entity(&mut self) -> Entity {
        self.world.spawn_empty().id()
    }

    /// Attach or replace `component` on `entity`. A missing entity is ignored.
    pub fn attach<C: Component>(&mut self, entity: Entity, component: C) {
        match self.world.get_entity_mut(entity) {
            Ok(mut e) => {
                e.insert(component);
            }
            Err(_) => warn!("attach: entity {:?} does not exist", entity),
        }
    }

    pub fn get<C: Component>(&self, entity: Entity) -> Option<&C> {
        self.world.get::<C>(entity)
    }

    /// Despawn `entity` with all of its components.
    pub fn remove(&mut self, entity: Entity) -> bool {
        self.world.despawn(entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.get_entity(entity).is_ok()
    }

    /// Snapshot of the entities matching `F`, e.g.
    /// `sim.query::<(With<Platform>, Without<Segment>)>()`.
    pub fn query<F: QueryFilter>(&mut self) -> Vec<Entity> {
        let mut query = self.world.query_filtered::<Entity, F>();
        query.iter(&self.world).collect()
    }

    /// The entity tagged [`Player`], if any.
    pub fn player_entity(&mut self) -> Option<Entity> {
        let mut query = self.world.query_filtered::<Entity, With<Player>>();
        query.iter(&self.world).next()
    }

    // --- Snake operations ---

    fn with_control<R>(&mut self, f: impl FnOnce(&mut SnakeControl) -> R) -> R {
        let mut state: SystemState<SnakeControl> = SystemState::new(&mut self.world);
        let result = {
            let mut control = state.get_mut(&mut self.world);
            f(&mut control)
        };
        state.apply(&mut self.world);
        result
    }

    pub fn grow(&mut self, creature: Entity) -> Option<Entity> {
        self.with_control(|control| control.grow(creature))
    }

    /// # Panics
    /// Panics if the chain only holds the head.
    pub fn remove_tail(&mut self, creature: Entity) -> Option<Entity> {
        self.with_control(|control| control.remove_tail(creature))
    }

    pub fn increase_speed(&mut self, creature: Entity) {
        self.with_control(|control| control.increase_speed(creature));
    }

    pub fn teleport(&mut self, creature: Entity, target: Vec2) {
        self.with_control(|control| control.teleport(creature, target));
    }

    /// A fresh id for a chain built outside a scene.
    pub fn next_chain_id(&mut self) -> ChainId {
        self.world.resource_mut::<ChainIds>().issue()
    }

    /// Identity of the creature's current chain, to hand back to [`Self::revert`].
    pub fn chain_id(&self, creature: Entity) -> Option<ChainId> {
        self.get::<SnakeChain>(creature).map(SnakeChain::id)
    }

    /// Request a reversal. Ignored when `chain` is not the creature's
    /// current chain or the snake is not moving.
    pub fn revert(&mut self, creature: Entity, chain: ChainId) -> bool {
        self.with_control(|control| control.revert(creature, chain))
    }

    pub fn steer(&mut self, creature: Entity, direction: Direction) {
        self.with_control(|control| control.steer(creature, direction));
    }

    /// Attach `timeout` to `entity`, replacing a pending one unless the
    /// pending one is final.
    pub fn arm_timeout(&mut self, entity: Entity, timeout: Timeout) -> bool {
        if !self.contains(entity) {
            warn!("arm_timeout: entity {:?} does not exist", entity);
            return false;
        }
        if self
            .world
            .get::<Timeout>(entity)
            .is_some_and(|pending| !pending.is_replaceable())
        {
            debug!("{:?} already has a final timeout pending", entity);
            return false;
        }
        self.world.entity_mut(entity).insert(timeout);
        true
    }

    // --- Round lifecycle ---

    /// Despawn every placed entity that is not [`Persistent`] and start a
    /// new round.
    pub fn reset_world(&mut self) {
        let doomed = self.query::<(With<MapPosition>, Without<Persistent>)>();
        info!("Resetting world, despawning {} entities", doomed.len());
        for entity in doomed {
            self.world.despawn(entity);
        }
        self.world.resource_mut::<GameState>().set(GameStates::Playing);
        self.world.resource_mut::<Messages<FeedbackCmd>>().clear();
    }

    pub fn game_state(&self) -> GameStates {
        self.world.resource::<GameState>().get()
    }

    // --- Feedback ---

    /// All feedback commands forwarded so far.
    pub fn drain_feedback(&self) -> Vec<FeedbackCmd> {
        self.feedback_rx.try_iter().collect()
    }

    /// Drain pending feedback into `collaborators`. Returns how many
    /// commands were dispatched.
    pub fn dispatch_feedback(&self, collaborators: &mut dyn Collaborators) -> usize {
        let mut count = 0;
        for cmd in self.feedback_rx.try_iter() {
            cmd.dispatch(collaborators);
            count += 1;
        }
        count
    }
}
