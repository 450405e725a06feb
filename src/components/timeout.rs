//! One-shot countdown that fires a deferred action.
//!
//! The [`Timeout`] component counts down each frame. When the remaining time
//! reaches zero the component is removed and a
//! [`TimeoutEvent`](crate::events::timeout::TimeoutEvent) carrying its
//! [`DeferredAction`] is triggered exactly once.
//!
//! # How It Works
//!
//! 1. The wall effect (or any caller) inserts a `Timeout` on the snake
//! 2. [`update_timeouts`](crate::systems::timeout::update_timeouts) subtracts the frame delta
//! 3. On expiry the component is removed and the event is triggered
//! 4. [`observe_timeout`](crate::events::timeout::observe_timeout) interprets the action
//!
//! An entity holds at most one pending timeout. Use
//! [`crate::systems::snake::SnakeControl::arm_timeout`] or
//! [`crate::simulation::Simulation::arm_timeout`] to arm one. Arming replaces
//! the pending timeout unless that one is final (see
//! [`DeferredAction::is_final`]).

use bevy_ecs::prelude::Component;

use crate::events::feedback::Screen;

/// What happens when a [`Timeout`] expires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredAction {
    /// End the round: the game state becomes `GameOver` and the game-over
    /// screen is requested.
    GameOver,
    /// Ask the navigation collaborator to show `screen`.
    ShowScreen(Screen),
}

impl DeferredAction {
    /// A pending final action cannot be replaced by a later arming.
    pub fn is_final(&self) -> bool {
        matches!(self, DeferredAction::GameOver)
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Timeout {
    /// Seconds left before the action fires.
    pub remaining: f32,
    pub action: DeferredAction,
}

impl Timeout {
    pub fn new(seconds: f32, action: DeferredAction) -> Self {
        Timeout {
            remaining: seconds,
            action,
        }
    }

    /// True when arming a new timeout may replace this pending one.
    pub fn is_replaceable(&self) -> bool {
        !self.action.is_final()
    }

    /// Advance the countdown. Returns true once the timeout has expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }
}
