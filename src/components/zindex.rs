//! Z-index component for draw ordering.
//!
//! The core never draws anything; the value is carried so the renderer can
//! stack holes below pieces and pieces below the head.

use bevy_ecs::prelude::Component;

/// Rendering order hint for 2D drawing. Higher values are drawn on top.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);

impl ZIndex {
    pub const HOLE: ZIndex = ZIndex(1);
    pub const PIECE: ZIndex = ZIndex(2);
    pub const HEAD: ZIndex = ZIndex(3);
}
