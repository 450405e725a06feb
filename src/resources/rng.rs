//! Seeded random source for visual effects.
//!
//! Only cosmetic choices (the death spin) draw from it, but it is seeded from
//! [`GameConfig::seed`](crate::resources::gameconfig::GameConfig) so a replay
//! with the same seed gives the same result.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

#[derive(Resource, Debug)]
pub struct SimRng(pub Rng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        SimRng(Rng::with_seed(seed))
    }

    /// Uniform value in `[min, max)`; returns `min` when the range is empty.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + self.0.f32() * (max - min)
    }

    /// Random sign, +1.0 or -1.0.
    pub fn sign(&mut self) -> f32 {
        if self.0.bool() { 1.0 } else { -1.0 }
    }
}
