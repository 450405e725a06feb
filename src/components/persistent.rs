//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component are skipped by
//! [`crate::simulation::Simulation::reset_world`]. Observers are spawned with
//! it so a level restart keeps them registered.

use bevy_ecs::prelude::Component;

/// Tag component used to mark entities that survive a world reset.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
