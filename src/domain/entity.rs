//! Domain entities: rooms, chat messages and the denormalized participant
//! index entry.

use std::collections::HashMap;

use serde::Serialize;

use super::value_object::{ConnectionId, MessageContent, RoomCode, Timestamp, UserEmail};

/// One chat message stored in a room's history.
///
/// Immutable once created; the stored record is also the broadcast payload,
/// so every participant sees the same timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub text: MessageContent,
    pub sender_email: UserEmail,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(text: MessageContent, sender_email: UserEmail, timestamp: Timestamp) -> Self {
        Self {
            text,
            sender_email,
            timestamp,
        }
    }
}

/// A named room: current participants plus append-only chat history.
///
/// Rooms are created the first time they are requested and never deleted; an
/// empty room simply stops being mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Room {
    pub code: RoomCode,
    /// Connection id to participant identity. Keys are unique; insertion
    /// order is irrelevant.
    pub participants: HashMap<ConnectionId, UserEmail>,
    /// Chronological, append-only chat history.
    pub messages: Vec<ChatMessage>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(code: RoomCode, created_at: Timestamp) -> Self {
        Self {
            code,
            participants: HashMap::new(),
            messages: Vec::new(),
            created_at,
        }
    }

    /// Insert a participant. Overwrites silently if the connection id is
    /// already present; the transport issues each id once, so this does not
    /// happen under normal operation.
    pub fn add_participant(&mut self, connection_id: ConnectionId, user_email: UserEmail) {
        self.participants.insert(connection_id, user_email);
    }

    /// Remove a participant if present (no-op otherwise) and return the
    /// post-removal headcount.
    pub fn remove_participant(&mut self, connection_id: &ConnectionId) -> usize {
        self.participants.remove(connection_id);
        self.participants.len()
    }

    /// Append a chat message and return the stored record, so callers can
    /// broadcast exactly what was stored.
    pub fn add_message(
        &mut self,
        text: MessageContent,
        sender_email: UserEmail,
        timestamp: Timestamp,
    ) -> ChatMessage {
        let message = ChatMessage::new(text, sender_email, timestamp);
        self.messages.push(message.clone());
        message
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Connection ids of all current members.
    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.participants.keys().cloned().collect()
    }
}

/// Reverse-index entry: resolves a bare connection id back to its room and
/// identity on disconnect.
///
/// Holds a non-owning reference (code + identity, not the `Room` itself);
/// the owning `Room`'s participant map remains the source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantEntry {
    pub room_code: RoomCode,
    pub user_email: UserEmail,
}

/// Result of removing a participant through the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedParticipant {
    pub room_code: RoomCode,
    pub user_email: UserEmail,
    /// Headcount of the room after removal. Never negative; floors at 0.
    pub remaining_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Room {
        Room::new(
            RoomCode::new("ABCD".to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    fn conn(raw: &str) -> ConnectionId {
        ConnectionId::new(raw.to_string()).unwrap()
    }

    fn email(raw: &str) -> UserEmail {
        UserEmail::new(raw.to_string()).unwrap()
    }

    #[test]
    fn test_add_participant_increases_headcount() {
        let mut room = room();

        room.add_participant(conn("c1"), email("a@x.com"));
        room.add_participant(conn("c2"), email("b@x.com"));

        assert_eq!(room.participant_count(), 2);
    }

    #[test]
    fn test_add_participant_overwrites_duplicate_connection_id() {
        let mut room = room();

        room.add_participant(conn("c1"), email("a@x.com"));
        room.add_participant(conn("c1"), email("b@x.com"));

        assert_eq!(room.participant_count(), 1);
        assert_eq!(room.participants.get(&conn("c1")), Some(&email("b@x.com")));
    }

    #[test]
    fn test_remove_participant_returns_remaining_count() {
        let mut room = room();
        room.add_participant(conn("c1"), email("a@x.com"));
        room.add_participant(conn("c2"), email("b@x.com"));

        let remaining = room.remove_participant(&conn("c1"));

        assert_eq!(remaining, 1);
        assert!(!room.participants.contains_key(&conn("c1")));
    }

    #[test]
    fn test_remove_absent_participant_is_a_noop() {
        let mut room = room();

        let remaining = room.remove_participant(&conn("ghost"));

        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_add_message_returns_stored_record() {
        let mut room = room();

        let stored = room.add_message(
            MessageContent::new("hi".to_string()),
            email("a@x.com"),
            Timestamp::new(42),
        );

        assert_eq!(room.messages.len(), 1);
        assert_eq!(room.messages[0], stored);
        assert_eq!(stored.text.as_str(), "hi");
        assert_eq!(stored.timestamp, Timestamp::new(42));
    }

    #[test]
    fn test_messages_are_append_only_in_order() {
        let mut room = room();

        room.add_message(
            MessageContent::new("first".to_string()),
            email("a@x.com"),
            Timestamp::new(1),
        );
        room.add_message(
            MessageContent::new("second".to_string()),
            email("b@x.com"),
            Timestamp::new(2),
        );

        assert_eq!(room.messages[0].text.as_str(), "first");
        assert_eq!(room.messages[1].text.as_str(), "second");
    }
}
