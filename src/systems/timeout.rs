//! Deferred action countdown.
//!
//! Each frame [`update_timeouts`] subtracts the scaled delta from every
//! [`Timeout`]. An expired timeout is removed from its entity before the
//! [`TimeoutEvent`] is triggered, so each one fires exactly once.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::timeout::Timeout;
use crate::events::timeout::TimeoutEvent;
use crate::resources::worldtime::WorldTime;

pub fn update_timeouts(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Timeout)>,
    mut commands: Commands,
) {
    let dt = world_time.delta;
    for (entity, mut timeout) in query.iter_mut() {
        if timeout.tick(dt) {
            debug!("timeout on {:?} expired: {:?}", entity, timeout.action);
            commands.entity(entity).remove::<Timeout>();
            commands.trigger(TimeoutEvent {
                entity,
                action: timeout.action,
            });
        }
    }
}
