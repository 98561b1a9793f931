//! A presentation sink that forwards commands over a channel.

use roomsort_round::{CommandSink, SinkCommand};
use tokio::sync::mpsc;
use tracing::trace;

/// Sends every presentation command to an unbounded channel, so a
/// renderer on another task can pick them up.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<SinkCommand>,
}

impl ChannelSink {
    /// Creates a sink and the receiving end for the renderer.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SinkCommand>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl CommandSink for ChannelSink {
    fn emit(&mut self, command: SinkCommand) {
        // Nobody listening is fine: the game runs on without a screen.
        if self.sender.send(command).is_err() {
            trace!("presentation receiver dropped");
        }
    }
}
