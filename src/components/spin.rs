//! Constant rotation effect.
//!
//! Pick-ups, holes and snake pieces turn slowly in place; when the snake dies
//! every piece gets a random, much faster spin. The
//! [`spin_system`](crate::systems::spin::spin_system) advances
//! [`Rotation`](super::rotation::Rotation) from it.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    /// Angular speed; negative values turn the other way.
    pub degrees_per_second: f32,
}

impl Spin {
    pub fn new(degrees_per_second: f32) -> Self {
        Spin { degrees_per_second }
    }
}
