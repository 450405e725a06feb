//! High-level round state.
//!
//! A round starts in [`GameStates::Playing`]. The first wall hit moves it to
//! [`GameStates::Dying`] and arms the game-over timeout; when that fires the
//! state becomes [`GameStates::GameOver`]. The wall effect checks this state
//! so that the death sequence runs once per round.

use bevy_ecs::prelude::Resource;

/// Discrete high-level states a round can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    Playing,
    Dying,
    GameOver,
}

/// Authoritative current game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    /// Create a new state initialized to [`GameStates::Playing`].
    pub fn new() -> Self {
        GameState {
            current: GameStates::Playing,
        }
    }
    /// Read-only access to the current state.
    pub fn get(&self) -> GameStates {
        self.current
    }
    /// Update the current state immediately.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
    pub fn is_playing(&self) -> bool {
        self.current == GameStates::Playing
    }
}
