//! UseCase: clean up after a transport-originated disconnect.
//!
//! The transport reports only a connection id; the participant index
//! resolves it back to the room and identity to clean up. A disconnect for
//! a connection that never joined anything is a silent no-op.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomCode, SignalingRepository, UserEmail};

/// Result of removing a joined participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectOutcome {
    pub room_code: RoomCode,
    pub user_email: UserEmail,
    /// Room headcount after removal. Floors at 0.
    pub remaining_count: usize,
    /// Everyone still in the room; receives both `user-left` and
    /// `participants-update`.
    pub remaining_members: Vec<ConnectionId>,
}

pub struct DisconnectParticipantUseCase {
    repository: Arc<dyn SignalingRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn SignalingRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Unregister the connection from the pusher and, if it was a joined
    /// participant, remove it from its room and the index.
    ///
    /// Returns `None` when the connection never joined a room; there is
    /// nothing to broadcast in that case.
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<DisconnectOutcome> {
        self.message_pusher.unregister_client(connection_id).await;

        let removed = match self.repository.remove_participant(connection_id).await {
            Ok(removed) => removed,
            Err(_) => {
                tracing::debug!(
                    "Disconnect for unjoined connection '{}', nothing to clean up",
                    connection_id.as_str()
                );
                return None;
            }
        };

        let remaining_members = self.repository.room_member_ids(&removed.room_code).await;

        Some(DisconnectOutcome {
            room_code: removed.room_code,
            user_email: removed.user_email,
            remaining_count: removed.remaining_count,
            remaining_members,
        })
    }

    /// Broadcast `user-left` to the remaining members.
    pub async fn broadcast_user_left(
        &self,
        targets: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), String> {
        self.message_pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }

    /// Broadcast the updated `participants-update` count.
    pub async fn broadcast_participant_count(
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::FixedClock;
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemorySignalingRepository,
    };
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    fn create_test_repository() -> Arc<InMemorySignalingRepository> {
        Arc::new(InMemorySignalingRepository::new(Arc::new(FixedClock::new(
            1000,
        ))))
    }

    fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        Arc::new(WebSocketMessagePusher::new(clients))
    }

    fn conn(raw: &str) -> ConnectionId {
        ConnectionId::new(raw.to_string()).unwrap()
    }

    fn code(raw: &str) -> RoomCode {
        RoomCode::new(raw.to_string()).unwrap()
    }

    fn email(raw: &str) -> UserEmail {
        UserEmail::new(raw.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_disconnect_removes_participant_and_reports_remaining() {
        let repository = create_test_repository();
        repository
            .add_participant(code("ABCD"), conn("c1"), email("a@x.com"))
            .await;
        repository
            .add_participant(code("ABCD"), conn("c2"), email("b@x.com"))
            .await;
        let usecase =
            DisconnectParticipantUseCase::new(repository.clone(), create_test_message_pusher());

        let outcome = usecase.execute(&conn("c2")).await.unwrap();

        assert_eq!(outcome.room_code, code("ABCD"));
        assert_eq!(outcome.user_email, email("b@x.com"));
        assert_eq!(outcome.remaining_count, 1);
        assert_eq!(outcome.remaining_members, vec![conn("c1")]);

        // Index and room membership are both cleaned up.
        assert!(repository.find_participant(&conn("c2")).await.is_none());
        let room = repository.find_room(&code("ABCD")).await.unwrap();
        assert!(!room.participants.contains_key(&conn("c2")));
    }

    #[tokio::test]
    async fn test_disconnect_of_unjoined_connection_is_a_noop() {
        let repository = create_test_repository();
        let usecase =
            DisconnectParticipantUseCase::new(repository.clone(), create_test_message_pusher());

        let outcome = usecase.execute(&conn("ghost")).await;

        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn test_last_disconnect_leaves_empty_room_with_count_zero() {
        let repository = create_test_repository();
        repository
            .add_participant(code("ABCD"), conn("c1"), email("a@x.com"))
            .await;
        let usecase =
            DisconnectParticipantUseCase::new(repository.clone(), create_test_message_pusher());

        let outcome = usecase.execute(&conn("c1")).await.unwrap();

        assert_eq!(outcome.remaining_count, 0);
        assert!(outcome.remaining_members.is_empty());
        // The room itself survives; rooms are never deleted.
        assert!(repository.find_room(&code("ABCD")).await.is_some());
    }

    #[tokio::test]
    async fn test_disconnect_unregisters_connection_from_pusher() {
        let repository = create_test_repository();
        repository
            .add_participant(code("ABCD"), conn("c1"), email("a@x.com"))
            .await;
        let clients = Arc::new(Mutex::new(HashMap::new()));
        let pusher = Arc::new(WebSocketMessagePusher::new(clients.clone()));
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        pusher.register_client(conn("c1"), tx).await;
        let usecase = DisconnectParticipantUseCase::new(repository, pusher);

        usecase.execute(&conn("c1")).await;

        assert!(clients.lock().await.is_empty());
    }
}
