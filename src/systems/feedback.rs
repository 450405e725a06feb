//! Systems that move [`FeedbackCmd`] messages out of the ECS world.
//!
//! Run [`forward_feedback_cmds`] after every system that writes feedback, then
//! [`update_feedback_cmds`] to advance the double-buffered message queue.

use crate::events::feedback::FeedbackCmd;
use crate::resources::feedback::FeedbackBridge;
use bevy_ecs::prelude::{MessageReader, Messages, Res, ResMut};

/// Forward ECS FeedbackCmd messages to the collaborators via the bridge sender.
pub fn forward_feedback_cmds(bridge: Res<FeedbackBridge>, mut reader: MessageReader<FeedbackCmd>) {
    for cmd in reader.read() {
        // Receiver may be gone at shutdown; dropping the command is fine then
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for FeedbackCmd so old messages are dropped.
pub fn update_feedback_cmds(mut msgs: ResMut<Messages<FeedbackCmd>>) {
    msgs.update();
}
