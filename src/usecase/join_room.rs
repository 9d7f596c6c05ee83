//! UseCase: join a connection to a room.
//!
//! Implements the only state transition a connection has: unjoined to
//! joined. Gets or creates the room, records the participant in both the
//! room and the process-wide index, and tells the caller who to notify.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomCode, SignalingRepository, UserEmail};

use super::error::JoinRoomError;

/// Result of a successful join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub room_code: RoomCode,
    pub user_email: UserEmail,
    /// Room headcount after the join.
    pub participant_count: usize,
    /// Every member except the joiner; receives `user-joined`.
    pub peers: Vec<ConnectionId>,
    /// Every member including the joiner; receives `participants-update`.
    pub members: Vec<ConnectionId>,
}

pub struct JoinRoomUseCase {
    repository: Arc<dyn SignalingRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    pub fn new(
        repository: Arc<dyn SignalingRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Execute the join.
    ///
    /// Raw strings from the wire are validated here, at the boundary; the
    /// repository only ever sees checked value objects. A second join from
    /// an already-joined connection moves it: the previous membership is
    /// removed first so the index never points at a room the connection is
    /// no longer part of.
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_code: String,
        user_email: String,
    ) -> Result<JoinOutcome, JoinRoomError> {
        let room_code = RoomCode::new(room_code)?;
        let user_email = UserEmail::new(user_email)?;

        if self.repository.find_participant(connection_id).await.is_some() {
            // Silent move between rooms; no departure broadcast.
            let _ = self.repository.remove_participant(connection_id).await;
        }

        let participant_count = self
            .repository
            .add_participant(room_code.clone(), connection_id.clone(), user_email.clone())
            .await;

        let members = self.repository.room_member_ids(&room_code).await;
        let peers = members
            .iter()
            .filter(|id| *id != connection_id)
            .cloned()
            .collect();

        Ok(JoinOutcome {
            room_code,
            user_email,
            participant_count,
            peers,
            members,
        })
    }

    /// Broadcast `user-joined` to the joiner's peers.
    pub async fn broadcast_user_joined(
        &self,
        targets: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), String> {
        self.message_pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }

    /// Broadcast `participants-update` to the whole room.
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

    /// Report a join failure to the originating connection only.
    pub async fn notify_join_failed(&self, connection_id: &ConnectionId, message: &str) {
        if let Err(e) = self.message_pusher.push_to(connection_id, message).await {
            tracing::warn!(
                "Failed to deliver join error to '{}': {}",
                connection_id.as_str(),
                e
            );
        }
    }
}
