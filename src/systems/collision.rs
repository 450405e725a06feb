//! Snake-versus-platform collision.
//!
//! # System Flow
//!
//! [`collision_system`] runs right after the snake chain system:
//!
//! 1. [`ContactFinder`] tests every moving creature head against every
//!    platform with the strict AABB overlap and collects [`Contact`]s
//! 2. Each contact triggers a [`PlatformHitEvent`] and applies the effect of
//!    its [`PlatformKind`] through [`SnakeControl`]
//!
//! Finding is read-only and effects go through [`Commands`], so despawning a
//! platform never disturbs the scan. A platform consumed by one creature is
//! skipped for the rest of the pass, as are contacts of a creature that was
//! stopped earlier in the pass.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::{debug, warn};
use rustc_hash::FxHashSet;

use crate::components::bounds::Bounds;
use crate::components::platform::{Platform, PlatformKind};
use crate::components::snake::{SnakeChain, SnakeState};
use crate::events::feedback::{Color, FeedbackCmd};
use crate::events::platform::PlatformHitEvent;
use crate::systems::snake::SnakeControl;

/// Label, size and duration of the fruit counter animation.
pub const FRUIT_LABEL: &str = "fruits";
pub const FRUIT_LABEL_SIZE: f32 = 24.0;
pub const FRUIT_LABEL_DURATION: f32 = 0.5;

/// A creature head overlapping a platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub creature: Entity,
    pub platform: Entity,
    pub kind: PlatformKind,
}

/// Read-only view used to find contacts.
#[derive(SystemParam)]
pub struct ContactFinder<'w, 's> {
    creatures: Query<'w, 's, (Entity, &'static SnakeState, &'static Bounds), With<SnakeChain>>,
    platforms: Query<'w, 's, (Entity, &'static Platform, &'static Bounds)>,
}

impl ContactFinder<'_, '_> {
    /// All overlaps between moving creatures and platforms, in query order.
    pub fn contacts(&self) -> Vec<Contact> {
        let mut contacts = Vec::new();
        for (creature, state, head) in self.creatures.iter() {
            if !state.collides() {
                continue;
            }
            for (platform, tag, bounds) in self.platforms.iter() {
                if platform != creature && head.overlaps(bounds) {
                    contacts.push(Contact {
                        creature,
                        platform,
                        kind: tag.kind,
                    });
                }
            }
        }
        contacts
    }
}

/// Find contacts, then apply their platform effects.
pub fn collision_system(
    mut params: ParamSet<(ContactFinder, SnakeControl)>,
    mut feedback: MessageWriter<FeedbackCmd>,
) {
    let contacts = params.p0().contacts();
    if contacts.is_empty() {
        return;
    }

    let mut control = params.p1();
    let mut consumed: FxHashSet<Entity> = FxHashSet::default();
    for contact in contacts {
        if consumed.contains(&contact.platform) {
            continue;
        }
        if control.state(contact.creature) != Some(SnakeState::Moving) {
            debug!("{:?} stopped earlier in this pass", contact.creature);
            continue;
        }
        if contact.kind.is_consumed() {
            consumed.insert(contact.platform);
            control.commands().entity(contact.platform).try_despawn();
        }
        control.commands().trigger(PlatformHitEvent {
            creature: contact.creature,
            platform: contact.platform,
            kind: contact.kind,
        });
        apply_effect(&mut control, &contact, &mut feedback);
    }
}

fn apply_effect(
    control: &mut SnakeControl,
    contact: &Contact,
    feedback: &mut MessageWriter<FeedbackCmd>,
) {
    let creature = contact.creature;
    match contact.kind {
        PlatformKind::Fruit => {
            control.grow(creature);
            if let Some(eaten) = control.record_fruit(creature) {
                feedback.write(FeedbackCmd::AnimateCount {
                    label: FRUIT_LABEL.to_string(),
                    value: eaten,
                    color: Color::GOLD,
                    size: FRUIT_LABEL_SIZE,
                    duration: FRUIT_LABEL_DURATION,
                });
            }
        }
        PlatformKind::Poison => match control.chain_len(creature) {
            Some(len) if len > 1 => {
                control.remove_tail(creature);
            }
            _ => warn!("{:?} ate poison with no body left to lose", creature),
        },
        PlatformKind::Speed => control.increase_speed(creature),
        PlatformKind::Teleport { exit } => {
            control.teleport_to(creature, exit);
        }
        PlatformKind::Bounce => {
            if let Some(chain) = control.chain_id(creature) {
                control.revert(creature, chain);
            }
        }
        PlatformKind::Wall => {
            control.kill(creature);
        }
    }
}
