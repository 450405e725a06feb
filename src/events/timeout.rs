//! Timeout expiration events.
//!
//! When a [`Timeout`](crate::components::timeout::Timeout) component runs
//! out, [`update_timeouts`](crate::systems::timeout::update_timeouts) removes
//! it and triggers a [`TimeoutEvent`]. [`observe_timeout`] interprets the
//! carried [`DeferredAction`].

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::timeout::DeferredAction;
use crate::events::feedback::{FeedbackCmd, Screen};
use crate::resources::gamestate::{GameState, GameStates};

/// Event emitted when a timeout expires.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutEvent {
    /// The entity whose timeout expired.
    pub entity: Entity,
    /// The action the timeout was armed with.
    pub action: DeferredAction,
}

/// Observer that runs the deferred action of an expired timeout.
pub fn observe_timeout(
    trigger: On<TimeoutEvent>,
    mut game_state: ResMut<GameState>,
    mut feedback: MessageWriter<FeedbackCmd>,
) {
    let event = trigger.event();
    match event.action {
        DeferredAction::GameOver => {
            info!("Game over (timeout on {:?})", event.entity);
            game_state.set(GameStates::GameOver);
            feedback.write(FeedbackCmd::ShowScreen {
                screen: Screen::GameOver,
            });
        }
        DeferredAction::ShowScreen(screen) => {
            feedback.write(FeedbackCmd::ShowScreen { screen });
        }
    }
}
