//! ECS resources made available to systems.
//!
//! Overview
//! - `chainids` – per-world counter behind chain identities
//! - `feedback` – channel bridge towards the external collaborators
//! - `gameconfig` – rule tuning loaded from an INI file
//! - `gamestate` – playing / dying / game over
//! - `rng` – seeded random source for cosmetic effects
//! - `worldtime` – simulation time and delta
pub mod chainids;
pub mod feedback;
pub mod gameconfig;
pub mod gamestate;
pub mod rng;
pub mod worldtime;
