//! Snake components: the segment chain, the motion state and the score.
//!
//! A snake is a single "creature" entity that carries [`SnakeChain`],
//! [`SnakeState`], [`RigidBody`](super::rigidbody::RigidBody) and
//! [`MapPosition`](super::mapposition::MapPosition). The creature is its own
//! head: `parts[0]` is always the creature entity, and the remaining parts are
//! separate [`Segment`] entities that follow it.
//!
//! # State machine
//!
//! ```text
//!   Moving --revert()--> Reverting --next snake tick--> Moving (velocity negated)
//!   Moving --wall hit--> Stopped (terminal)
//! ```

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;

/// Identity of a chain component, issued by
/// [`ChainIds`](crate::resources::chainids::ChainIds).
///
/// [`crate::systems::snake::SnakeControl::revert`] only acts when the caller
/// hands back the id of the creature's current chain, so a stale request
/// aimed at a replaced chain is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChainId(pub(crate) u32);

/// Ordered body of the snake, head first.
///
/// Invariant: never empty, and `parts[0]` is the entity that owns the chain.
#[derive(Component, Clone, Debug)]
pub struct SnakeChain {
    parts: Vec<Entity>,
    id: ChainId,
}

impl SnakeChain {
    /// A chain made of the head only.
    pub fn new(head: Entity, id: ChainId) -> Self {
        Self {
            parts: vec![head],
            id,
        }
    }

    /// A chain with `head` followed by `segments`, in order.
    pub fn with_segments(
        head: Entity,
        id: ChainId,
        segments: impl IntoIterator<Item = Entity>,
    ) -> Self {
        let mut chain = Self::new(head, id);
        chain.parts.extend(segments);
        chain
    }

    pub fn id(&self) -> ChainId {
        self.id
    }

    pub fn head(&self) -> Entity {
        self.parts[0]
    }

    pub fn tail(&self) -> Entity {
        self.parts[self.parts.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn parts(&self) -> &[Entity] {
        &self.parts
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.parts.contains(&entity)
    }

    /// Append a new tail segment.
    pub fn push(&mut self, segment: Entity) {
        self.parts.push(segment);
    }

    /// Detach and return the tail segment.
    ///
    /// # Panics
    /// Panics if the chain only holds the head.
    pub fn pop_tail(&mut self) -> Entity {
        assert!(
            self.parts.len() > 1,
            "cannot shrink a snake chain below its head"
        );
        self.parts.pop().expect("chain length checked above")
    }
}

/// Motion mode of a snake.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SnakeState {
    #[default]
    Moving,
    /// A bounce was requested; the next snake tick flips the velocity.
    Reverting,
    /// Dead. Neither the chain system nor collision touch it anymore.
    Stopped,
}

impl SnakeState {
    /// Request a reversal. Only a moving snake can start reverting, which
    /// makes repeated requests within one tick collapse into one.
    pub fn request_revert(&mut self) -> bool {
        if *self == SnakeState::Moving {
            *self = SnakeState::Reverting;
            true
        } else {
            false
        }
    }

    /// Whether collision tests should run for a snake in this state.
    pub fn collides(&self) -> bool {
        matches!(self, SnakeState::Moving)
    }
}

/// Steering direction. World y grows upwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn unit(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::Y,
            Direction::Down => Vec2::NEG_Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }
}

/// Marker for body pieces that follow a snake head.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Segment;

/// Marker for the snake controlled by the player.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;

/// Fruits eaten by a snake, and how many the level asks for.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FruitCount {
    pub eaten: u32,
    /// Zero means the level sets no goal.
    pub goal: u32,
}

impl FruitCount {
    pub fn new(goal: u32) -> Self {
        FruitCount { eaten: 0, goal }
    }

    pub fn is_complete(&self) -> bool {
        self.goal > 0 && self.eaten >= self.goal
    }
}
