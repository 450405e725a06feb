//! World-space position of an entity.
//!
//! Together with [`ZIndex`](super::zindex::ZIndex) and
//! [`Rotation`](super::rotation::Rotation) this forms the transform of an
//! entity. Movement and the snake chain write it; collision reads it through
//! [`Bounds`](super::bounds::Bounds), which is kept in sync.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { pos: Vec2::new(x, y) }
    }

    pub fn from_vec(pos: Vec2) -> Self {
        Self { pos }
    }
}
