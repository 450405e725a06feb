use bevy_ecs::prelude::*;

use crate::components::rotation::Rotation;
use crate::components::spin::Spin;
use crate::resources::worldtime::WorldTime;

/// Advance [`Rotation`] by each entity's [`Spin`], wrapped to `[0, 360)`.
pub fn spin_system(mut query: Query<(&mut Rotation, &Spin)>, time: Res<WorldTime>) {
    for (mut rotation, spin) in query.iter_mut() {
        rotation.degrees = (rotation.degrees + spin.degrees_per_second * time.delta).rem_euclid(360.0);
    }
}
