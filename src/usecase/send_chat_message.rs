//! UseCase: store a chat message and fan it out to the whole room.
//!
//! The stored record is also the broadcast payload, so every participant
//! (sender included) sees the same text, identity and timestamp. Chat into
//! a room that was never created is dropped without creating the room.

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{
    ChatMessage, ConnectionId, MessageContent, MessagePusher, RepositoryError, RoomCode,
    SignalingRepository, Timestamp, UserEmail,
};

use super::error::SendChatError;

/// Result of a stored chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    /// The record as stored in the room's history.
    pub message: ChatMessage,
    /// Every current member of the room, sender included.
    pub recipients: Vec<ConnectionId>,
}

pub struct SendChatMessageUseCase {
    repository: Arc<dyn SignalingRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendChatMessageUseCase {
    pub fn new(
        repository: Arc<dyn SignalingRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    pub async fn execute(
        &self,
        room_code: String,
        message: String,
        sender_email: String,
    ) -> Result<ChatOutcome, SendChatError> {
        let room_code = RoomCode::new(room_code)?;
        let sender_email = UserEmail::new(sender_email)?;
        let text = MessageContent::new(message);
        let timestamp = Timestamp::new(self.clock.now_utc_millis());

        let stored = self
            .repository
            .add_message(&room_code, text, sender_email, timestamp)
            .await
            .map_err(|e| match e {
                RepositoryError::RoomNotFound(code) => SendChatError::RoomNotFound(code),
                RepositoryError::ParticipantNotFound(code) => SendChatError::RoomNotFound(code),
            })?;

        let recipients = self.repository.room_member_ids(&room_code).await;

        Ok(ChatOutcome {
            message: stored,
            recipients,
        })
    }

    /// Broadcast the stored record to the whole room, sender included.
    pub async fn broadcast_chat_message(
        &self,
        targets: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), String> {
        self.message_pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }
}
