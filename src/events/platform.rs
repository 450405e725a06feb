//! Platform hit notification and its feedback observer.
//!
//! The collision system triggers a [`PlatformHitEvent`] for every overlap it
//! resolves, whatever the platform kind. Gameplay effects are already applied
//! by then; observers of this event only produce outside feedback such as
//! sounds or flashes.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::platform::PlatformKind;
use crate::events::feedback::FeedbackCmd;

/// Event fired when a snake head overlaps a platform.
///
/// `platform` may already be queued for despawn (fruit, poison and speed
/// platforms are consumed), so observers should rely on `kind` rather than
/// querying the platform entity.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlatformHitEvent {
    pub creature: Entity,
    pub platform: Entity,
    pub kind: PlatformKind,
}

/// Sound played for a hit on a platform of `kind`.
pub fn hit_sound(kind: &PlatformKind) -> &'static str {
    match kind {
        PlatformKind::Fruit => "eat",
        PlatformKind::Poison => "poison",
        PlatformKind::Wall => "crash",
        PlatformKind::Speed | PlatformKind::Bounce | PlatformKind::Teleport { .. } => "hit",
    }
}

/// Global observer that turns platform hits into sound commands.
pub fn observe_platform_hit(trigger: On<PlatformHitEvent>, mut feedback: MessageWriter<FeedbackCmd>) {
    let event = trigger.event();
    debug!(
        "{:?} hit {} platform {:?}",
        event.creature,
        event.kind.label(),
        event.platform
    );
    feedback.write(FeedbackCmd::play(hit_sound(&event.kind)));
}
