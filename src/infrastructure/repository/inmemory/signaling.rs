//! In-memory `SignalingRepository` implementation.
//!
//! The room registry and the participant index are plain `HashMap`s guarded
//! by one `tokio::sync::Mutex`. That single lock is the serialization point
//! for all room-state mutation: the index can never be observed out of sync
//! with room membership, because both are updated under the same lock
//! acquisition.
//!
//! All state is volatile, process-local memory. Rooms accumulate for the
//! life of the process; there is no expiry or deletion.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::common::time::Clock;
use crate::domain::{
    ChatMessage, ConnectionId, MessageContent, ParticipantEntry, RemovedParticipant,
    RepositoryError, Room, RoomCode, SignalingRepository, Timestamp, UserEmail,
};

#[derive(Default)]
struct RegistryState {
    /// Room registry, keyed by uppercase room code.
    rooms: HashMap<RoomCode, Room>,
    /// Reverse index from connection id to (room code, identity).
    participants: HashMap<ConnectionId, ParticipantEntry>,
}

impl RegistryState {
    fn get_or_create_room(&mut self, code: RoomCode, created_at: Timestamp) -> &mut Room {
        self.rooms
            .entry(code.clone())
            .or_insert_with(|| Room::new(code, created_at))
    }
}

/// In-memory registry + participant index behind a single lock.
pub struct InMemorySignalingRepository {
    state: Mutex<RegistryState>,
    clock: Arc<dyn Clock>,
}

impl InMemorySignalingRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            clock,
        }
    }
}

#[async_trait]
impl SignalingRepository for InMemorySignalingRepository {
    async fn get_or_create_room(&self, code: RoomCode) -> Room {
        let created_at = Timestamp::new(self.clock.now_utc_millis());
        let mut state = self.state.lock().await;
        state.get_or_create_room(code, created_at).clone()
    }

    async fn find_room(&self, code: &RoomCode) -> Option<Room> {
        let state = self.state.lock().await;
        state.rooms.get(code).cloned()
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let state = self.state.lock().await;
        state.rooms.values().cloned().collect()
    }

    async fn add_participant(
        &self,
        code: RoomCode,
        connection_id: ConnectionId,
        user_email: UserEmail,
    ) -> usize {
        let created_at = Timestamp::new(self.clock.now_utc_millis());
        let mut state = self.state.lock().await;

        let room = state.get_or_create_room(code.clone(), created_at);
        room.add_participant(connection_id.clone(), user_email.clone());
        let count = room.participant_count();

        state.participants.insert(
            connection_id,
            ParticipantEntry {
                room_code: code,
                user_email,
            },
        );

        count
    }

    async fn remove_participant(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<RemovedParticipant, RepositoryError> {
        let mut state = self.state.lock().await;

        let entry = state.participants.remove(connection_id).ok_or_else(|| {
            RepositoryError::ParticipantNotFound(connection_id.as_str().to_string())
        })?;

        let remaining_count = match state.rooms.get_mut(&entry.room_code) {
            Some(room) => room.remove_participant(connection_id),
            // Rooms are never deleted, so an indexed participant always has
            // a room; treat a missing one as an already-empty room.
            None => 0,
        };

        Ok(RemovedParticipant {
            room_code: entry.room_code,
            user_email: entry.user_email,
            remaining_count,
        })
    }

    async fn find_participant(&self, connection_id: &ConnectionId) -> Option<ParticipantEntry> {
        let state = self.state.lock().await;
        state.participants.get(connection_id).cloned()
    }

    async fn add_message(
        &self,
        code: &RoomCode,
        text: MessageContent,
        sender_email: UserEmail,
        timestamp: Timestamp,
    ) -> Result<ChatMessage, RepositoryError> {
        let mut state = self.state.lock().await;

        let room = state
            .rooms
            .get_mut(code)
            .ok_or_else(|| RepositoryError::RoomNotFound(code.as_str().to_string()))?;

        Ok(room.add_message(text, sender_email, timestamp))
    }

    async fn room_member_ids(&self, code: &RoomCode) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        state
            .rooms
            .get(code)
            .map(|room| room.member_ids())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::FixedClock;

    fn create_test_repository() -> InMemorySignalingRepository {
        InMemorySignalingRepository::new(Arc::new(FixedClock::new(1000)))
    }

    fn code(raw: &str) -> RoomCode {
        RoomCode::new(raw.to_string()).unwrap()
    }

    fn conn(raw: &str) -> ConnectionId {
        ConnectionId::new(raw.to_string()).unwrap()
    }

    fn email(raw: &str) -> UserEmail {
        UserEmail::new(raw.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_get_or_create_room_creates_empty_room() {
        let repo = create_test_repository();

        let room = repo.get_or_create_room(code("ABCD")).await;

        assert_eq!(room.code.as_str(), "ABCD");
        assert_eq!(room.participant_count(), 0);
        assert!(room.messages.is_empty());
    }

    #[tokio::test]
    async fn test_get_or_create_room_returns_existing_room() {
        // A code denotes at most one room: mutations through one handle are
        // visible through a later get-or-create of the same code.
        let repo = create_test_repository();
        repo.get_or_create_room(code("ABCD")).await;
        repo.add_participant(code("ABCD"), conn("c1"), email("a@x.com"))
            .await;

        let room = repo.get_or_create_room(code("ABCD")).await;

        assert_eq!(room.participant_count(), 1);
    }

    #[tokio::test]
    async fn test_find_room_is_a_pure_lookup() {
        let repo = create_test_repository();

        let missing = repo.find_room(&code("NOPE")).await;

        assert!(missing.is_none());
        // The lookup must not have created the room as a side effect.
        assert!(repo.list_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_participant_updates_room_and_index() {
        let repo = create_test_repository();

        let count = repo
            .add_participant(code("ABCD"), conn("c1"), email("a@x.com"))
            .await;

        assert_eq!(count, 1);
        let entry = repo.find_participant(&conn("c1")).await.unwrap();
        assert_eq!(entry.room_code, code("ABCD"));
        assert_eq!(entry.user_email, email("a@x.com"));
        let room = repo.find_room(&code("ABCD")).await.unwrap();
        assert!(room.participants.contains_key(&conn("c1")));
    }

    #[tokio::test]
    async fn test_participant_count_grows_with_each_join() {
        let repo = create_test_repository();

        for k in 1..=5usize {
            let count = repo
                .add_participant(code("ABCD"), conn(&format!("c{k}")), email("a@x.com"))
                .await;
            assert_eq!(count, k);
        }
    }

    #[tokio::test]
    async fn test_remove_participant_clears_room_and_index() {
        let repo = create_test_repository();
        repo.add_participant(code("ABCD"), conn("c1"), email("a@x.com"))
            .await;
        repo.add_participant(code("ABCD"), conn("c2"), email("b@x.com"))
            .await;

        let removed = repo.remove_participant(&conn("c1")).await.unwrap();

        assert_eq!(removed.room_code, code("ABCD"));
        assert_eq!(removed.user_email, email("a@x.com"));
        assert_eq!(removed.remaining_count, 1);
        assert!(repo.find_participant(&conn("c1")).await.is_none());
        let room = repo.find_room(&code("ABCD")).await.unwrap();
        assert!(!room.participants.contains_key(&conn("c1")));
    }

    #[tokio::test]
    async fn test_remove_unknown_participant_is_an_error() {
        let repo = create_test_repository();

        let result = repo.remove_participant(&conn("ghost")).await;

        assert_eq!(
            result,
            Err(RepositoryError::ParticipantNotFound("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_remaining_count_floors_at_zero() {
        let repo = create_test_repository();
        repo.add_participant(code("ABCD"), conn("c1"), email("a@x.com"))
            .await;

        let removed = repo.remove_participant(&conn("c1")).await.unwrap();

        assert_eq!(removed.remaining_count, 0);
    }

    #[tokio::test]
    async fn test_add_message_requires_existing_room() {
        let repo = create_test_repository();

        let result = repo
            .add_message(
                &code("NOPE"),
                MessageContent::new("hi".to_string()),
                email("a@x.com"),
                Timestamp::new(42),
            )
            .await;

        assert_eq!(
            result,
            Err(RepositoryError::RoomNotFound("NOPE".to_string()))
        );
        // Still no room created as a side effect.
        assert!(repo.find_room(&code("NOPE")).await.is_none());
    }

    #[tokio::test]
    async fn test_add_message_returns_stored_record() {
        let repo = create_test_repository();
        repo.get_or_create_room(code("ABCD")).await;

        let stored = repo
            .add_message(
                &code("ABCD"),
                MessageContent::new("hi".to_string()),
                email("a@x.com"),
                Timestamp::new(42),
            )
            .await
            .unwrap();

        let room = repo.find_room(&code("ABCD")).await.unwrap();
        assert_eq!(room.messages, vec![stored]);
    }

    #[tokio::test]
    async fn test_room_member_ids_for_missing_room_is_empty() {
        let repo = create_test_repository();

        assert!(repo.room_member_ids(&code("NOPE")).await.is_empty());
    }
}
