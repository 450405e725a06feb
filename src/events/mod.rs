//! Event types and observers used by the simulation.
//!
//! Submodules:
//! - [`feedback`] – commands for the external collaborators (sound, camera, score label, screens)
//! - [`platform`] – generic hit notification for every resolved platform overlap
//! - [`timeout`] – expiry of a deferred action
pub mod feedback;
pub mod platform;
pub mod timeout;
