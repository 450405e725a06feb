//! Platform component: world objects the snake can run into.
//!
//! Every platform carries a [`PlatformKind`] that decides what happens when
//! the snake head overlaps it. The collision system matches on the kind
//! exhaustively, so adding a variant forces every effect site to handle it.
//!
//! Teleport holes hold a plain [`Entity`] handle to their exit. The handle
//! does not keep the exit alive; it is looked up through a query when the
//! hole is hit and ignored if the exit no longer exists.

use bevy_ecs::prelude::{Component, Entity};

/// What a platform does to the snake that touches it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlatformKind {
    /// Consumed; the snake grows and the fruit counter goes up.
    Fruit,
    /// Consumed; the snake loses its tail segment.
    Poison,
    /// Consumed; the snake speeds up.
    Speed,
    /// Kills the snake.
    Wall,
    /// "Boing" block; the snake reverses direction.
    Bounce,
    /// Hole that moves the head onto `exit`.
    Teleport { exit: Entity },
}

impl PlatformKind {
    /// Whether touching the platform removes it from the world.
    pub fn is_consumed(&self) -> bool {
        matches!(self, Self::Fruit | Self::Poison | Self::Speed)
    }

    /// Short label used in logs and by the feedback layer.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fruit => "fruit",
            Self::Poison => "poison",
            Self::Speed => "speed",
            Self::Wall => "wall",
            Self::Bounce => "bounce",
            Self::Teleport { .. } => "teleport",
        }
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Platform {
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(kind: PlatformKind) -> Self {
        Self { kind }
    }
}
