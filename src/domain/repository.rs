//! Repository trait for the room registry and participant index.
//!
//! The domain layer defines the data-access interface it needs; the
//! infrastructure layer provides the concrete implementation (dependency
//! inversion). The registry and the participant index live behind one
//! interface so an implementation can keep them consistent under a single
//! serialization point.

use async_trait::async_trait;
use thiserror::Error;

use super::entity::{ChatMessage, ParticipantEntry, RemovedParticipant, Room};
use super::value_object::{ConnectionId, MessageContent, RoomCode, Timestamp, UserEmail};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),
}

/// Room registry plus the process-wide participant index.
///
/// Invariant: a connection id is present in the index if and only if it is a
/// member of the room named by its entry. Implementations must serialize all
/// mutations so the invariant is never observably violated.
#[async_trait]
pub trait SignalingRepository: Send + Sync {
    /// Get the room for `code`, creating an empty one if absent. Returns a
    /// snapshot of the (existing or new) room. A code denotes at most one
    /// room for the registry's lifetime.
    async fn get_or_create_room(&self, code: RoomCode) -> Room;

    /// Pure lookup, exact match on the stored (uppercase) code.
    async fn find_room(&self, code: &RoomCode) -> Option<Room>;

    /// Snapshots of every room in the registry.
    async fn list_rooms(&self) -> Vec<Room>;

    /// Add a participant to `code` (get-or-create) and record it in the
    /// index. Returns the room's headcount after insertion.
    async fn add_participant(
        &self,
        code: RoomCode,
        connection_id: ConnectionId,
        user_email: UserEmail,
    ) -> usize;

    /// Resolve `connection_id` through the index and remove it from both the
    /// index and its room.
    async fn remove_participant(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<RemovedParticipant, RepositoryError>;

    /// Index lookup without mutation.
    async fn find_participant(&self, connection_id: &ConnectionId) -> Option<ParticipantEntry>;

    /// Append a chat message to an existing room and return the stored
    /// record. Fails if the room was never created.
    async fn add_message(
        &self,
        code: &RoomCode,
        text: MessageContent,
        sender_email: UserEmail,
        timestamp: Timestamp,
    ) -> Result<ChatMessage, RepositoryError>;

    /// Connection ids of all current members of `code`. Empty if the room
    /// does not exist.
    async fn room_member_ids(&self, code: &RoomCode) -> Vec<ConnectionId>;
}
