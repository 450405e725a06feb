//! Snake arcade simulation core.
//!
//! This module exposes the ECS components, resources, systems and events of
//! the simulation, the [`simulation::Simulation`] facade and the scene loader,
//! for use by the `snake-sim` binary, integration tests and game front ends.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod simulation;
pub mod systems;
