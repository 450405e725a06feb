//! Axis-aligned bounding box used for overlap testing.
//!
//! Unlike a collider that is offset from the position at query time,
//! [`Bounds`] stores the rectangle itself. Every system that moves an entity
//! calls [`Bounds::sync`] afterwards, so `origin` always equals the entity's
//! [`MapPosition`](super::mapposition::MapPosition).

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Bounds {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Bounds {
    /// Create Bounds with given size, anchored at the world origin.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            size: Vec2::new(width, height),
        }
    }

    /// Builder: anchor the rectangle at `origin`.
    pub fn at(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Move the rectangle so its origin matches the entity position.
    pub fn sync(&mut self, position: Vec2) {
        self.origin = position;
    }

    /// Returns (min, max) of the AABB.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self) -> (Vec2, Vec2) {
        let p0 = self.origin;
        let p1 = p0 + self.size;
        (p0.min(p1), p0.max(p1))
    }

    /// AABB vs AABB overlap test. Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        let (min_a, max_a) = self.aabb();
        let (min_b, max_b) = other.aabb();
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }
}
