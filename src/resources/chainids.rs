//! Issues [`ChainId`]s for the chains spawned into one world.
//!
//! Ids are only compared within a world, so every world keeps its own
//! counter. Scene spawning and [`crate::simulation::Simulation`] draw from it.

use bevy_ecs::prelude::Resource;

use crate::components::snake::ChainId;

#[derive(Resource, Debug, Default)]
pub struct ChainIds {
    issued: u32,
}

impl ChainIds {
    /// A fresh id, never handed out before by this counter.
    pub fn issue(&mut self) -> ChainId {
        self.issued += 1;
        ChainId(self.issued)
    }

    /// How many ids were handed out.
    pub fn issued(&self) -> u32 {
        self.issued
    }
}
