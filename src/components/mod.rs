//! ECS components for entities.
//!
//! All simulation state lives in these components; systems own no copies.
//!
//! Submodules overview:
//! - [`bounds`] – axis-aligned rectangle kept in sync with the position
//! - [`mapposition`] – world-space position of an entity
//! - [`persistent`] – marker for entities that survive a world reset
//! - [`platform`] – platform kind (fruit, poison, speed, wall, bounce, teleport)
//! - [`rigidbody`] – velocity of a moving entity
//! - [`rotation`] – rotation angle in degrees
//! - [`snake`] – segment chain, motion state, score and markers
//! - [`spin`] – constant rotation effect
//! - [`timeout`] – one-shot countdown carrying a deferred action
//! - [`zindex`] – draw order hint

pub mod bounds;
pub mod mapposition;
pub mod persistent;
pub mod platform;
pub mod rigidbody;
pub mod rotation;
pub mod snake;
pub mod spin;
pub mod timeout;
pub mod zindex;
