//! Free movement system.
//!
//! Integrates positions from [`RigidBody`] velocities for every entity that is
//! not a snake. Snake heads carry a `RigidBody` too, but they are advanced by
//! [`crate::systems::snake::snake_system`] together with their body.
use bevy_ecs::prelude::*;

use crate::components::bounds::Bounds;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::snake::SnakeChain;
use crate::resources::worldtime::WorldTime;

/// `position += velocity * delta`, then re-anchor the entity's [`Bounds`].
pub fn movement(
    mut query: Query<(&mut MapPosition, &RigidBody, Option<&mut Bounds>), Without<SnakeChain>>,
    time: Res<WorldTime>,
) {
    let dt = time.delta;
    for (mut position, rigidbody, bounds) in query.iter_mut() {
        position.pos += rigidbody.velocity * dt;
        if let Some(mut bounds) = bounds {
            bounds.sync(position.pos);
        }
    }
}
