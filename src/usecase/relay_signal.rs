//! UseCase: relay one signaling payload to one target connection.
//!
//! Stateless by design: offer, answer and ice-candidate events mutate
//! nothing and are forwarded whether or not sender or target has joined a
//! room. The payload reaches the target exactly as serialized by the
//! caller.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher};

pub struct RelaySignalUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// Forward an already-serialized event to `target`. An unknown target is
    /// reported as an error for the caller to log; nothing is sent back to
    /// the sender.
    pub async fn execute(
        &self,
        target: &ConnectionId,
        message: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.push_to(target, message).await
    }
}
