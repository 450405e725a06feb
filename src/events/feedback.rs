//! Commands sent *out* of the simulation to its collaborators.
//!
//! The core never plays sounds, moves cameras, animates labels or switches
//! screens itself. Systems and observers write [`FeedbackCmd`] messages; the
//! [`forward_feedback_cmds`](crate::systems::feedback::forward_feedback_cmds)
//! system pushes them through the channel held by
//! [`FeedbackBridge`](crate::resources::feedback::FeedbackBridge), and the
//! receiving side routes each one to a [`Collaborators`] implementation with
//! [`FeedbackCmd::dispatch`].

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;
use serde::{Deserialize, Serialize};

/// Screens the navigation collaborator knows how to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    MainMenu,
    GameOver,
    LevelSelect,
}

/// Plain RGB color for label animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const GOLD: Color = Color::rgb(255, 203, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

/// Commands sent *to* the collaborators.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum FeedbackCmd {
    PlaySound {
        id: String,
    },
    FollowCamera {
        entity: Entity,
    },
    AnimateCount {
        label: String,
        value: u32,
        color: Color,
        size: f32,
        duration: f32,
    },
    ShowScreen {
        screen: Screen,
    },
}

impl FeedbackCmd {
    pub fn play(id: impl Into<String>) -> Self {
        FeedbackCmd::PlaySound { id: id.into() }
    }

    /// Route the command to the matching collaborator call.
    pub fn dispatch(self, collaborators: &mut dyn Collaborators) {
        match self {
            FeedbackCmd::PlaySound { id } => collaborators.play(&id),
            FeedbackCmd::FollowCamera { entity } => collaborators.follow(entity),
            FeedbackCmd::AnimateCount {
                label,
                value,
                color,
                size,
                duration,
            } => collaborators.animate_count(&label, value, color, size, duration),
            FeedbackCmd::ShowScreen { screen } => collaborators.show_screen(screen),
        }
    }
}

/// The narrow interface of the external services: audio, camera, score
/// label animation and screen navigation.
pub trait Collaborators {
    fn play(&mut self, sound_id: &str);
    fn follow(&mut self, entity: Entity);
    fn animate_count(&mut self, label: &str, value: u32, color: Color, size: f32, duration: f32);
    fn show_screen(&mut self, screen: Screen);
}
