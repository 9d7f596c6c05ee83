//! Conversion logic between DTOs and domain entities.

use crate::common::time::timestamp_to_rfc3339;
use crate::domain::entity::{ChatMessage, Room};
use crate::infrastructure::dto::http::{ParticipantDetailDto, RoomDetailDto, RoomSummaryDto};
use crate::infrastructure::dto::websocket::ServerEvent;

impl From<ChatMessage> for ServerEvent {
    fn from(message: ChatMessage) -> Self {
        ServerEvent::ChatMessage {
            text: message.text.into_string(),
            sender_email: message.sender_email.into_string(),
            timestamp: message.timestamp.value(),
        }
    }
}

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            code: room.code.as_str().to_string(),
            participant_count: room.participant_count(),
            message_count: room.messages.len(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&Room> for RoomDetailDto {
    fn from(room: &Room) -> Self {
        let mut participants: Vec<ParticipantDetailDto> = room
            .participants
            .iter()
            .map(|(id, email)| ParticipantDetailDto {
                socket_id: id.as_str().to_string(),
                user_email: email.as_str().to_string(),
            })
            .collect();
        // Sort by socket id for consistent ordering
        participants.sort_by(|a, b| a.socket_id.cmp(&b.socket_id));

        Self {
            code: room.code.as_str().to_string(),
            participants,
            message_count: room.messages.len(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}
