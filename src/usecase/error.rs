//! UseCase error types.

use thiserror::Error;

use crate::domain::ValidationError;

/// Failures while handling a `join-room` event. Reported only to the
/// originating connection as an `error` event; the connection stays open.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinRoomError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

/// Failures while handling a `chat-message` event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendChatError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// Chat into a room that was never created. Treated as a silent no-op
    /// by the handler, not surfaced to the client.
    #[error("room '{0}' does not exist")]
    RoomNotFound(String),
}
