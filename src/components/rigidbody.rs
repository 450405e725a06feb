//! Kinematic body storing the velocity of an entity.
//!
//! The [`RigidBody`] component is the "movement" part of an entity. Free
//! movers are integrated by [`crate::systems::movement::movement`]; snake heads
//! are integrated by [`crate::systems::snake::snake_system`] instead, which
//! also drags the body segments behind the head.
//!
//! Removing the component stops an entity; the wall sequence does that to
//! everything that moves.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Kinematic body storing velocity.
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::with_velocity(Vec2::new(16.0, 0.0));
/// rb.scale_speed(1.5); // speed boost
/// rb.reverse();        // bounce
/// ```
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody at rest.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
        }
    }

    /// Create a RigidBody already moving with `velocity`.
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self { velocity }
    }

    /// Set the velocity of the RigidBody.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Flip the direction of travel.
    pub fn reverse(&mut self) {
        self.velocity = -self.velocity;
    }

    /// Multiply the velocity by `factor`, keeping its direction.
    pub fn scale_speed(&mut self, factor: f32) {
        self.velocity *= factor;
    }

    /// Current speed (velocity magnitude).
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}
