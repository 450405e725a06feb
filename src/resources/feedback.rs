//! ECS resource that bridges the simulation with its collaborators.
//!
//! Use [`setup_feedback`] once during initialization. It inserts the
//! [`FeedbackBridge`] and the `Messages<FeedbackCmd>` mailbox, and hands back
//! the receiving end of the channel. Whoever owns the audio device, the
//! camera, the score label and the menus drains that receiver, typically on
//! its own thread, and calls
//! [`FeedbackCmd::dispatch`](crate::events::feedback::FeedbackCmd::dispatch).

use crate::events::feedback::FeedbackCmd;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// Shared bridge between the ECS world and the collaborators.
#[derive(Resource)]
pub struct FeedbackBridge {
    /// Sender for [`FeedbackCmd`] messages (ECS -> collaborators).
    pub tx_cmd: Sender<FeedbackCmd>,
}

/// Create the feedback channel and register bridge resources.
///
/// Returns the receiver the collaborators read from.
pub fn setup_feedback(world: &mut World) -> Receiver<FeedbackCmd> {
    let (tx_cmd, rx_cmd) = unbounded::<FeedbackCmd>();
    world.insert_resource(FeedbackBridge { tx_cmd });
    world.insert_resource(Messages::<FeedbackCmd>::default());
    rx_cmd
}
