//! Outbound message capability.
//!
//! The relay never confirms delivery, retries or buffers for slow
//! subscribers: every send is fire-and-forget. Exposing the capability as a
//! trait keeps the relay logic decoupled from the transport and testable
//! with a fake or mock pusher.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::value_object::ConnectionId;

/// Channel through which serialized events reach one connection's writer task.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("no connected client '{0}'")]
    ClientNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// Fire-and-forget delivery to connected clients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a freshly accepted connection so targeted sends and
    /// broadcasts can reach it. Registration happens at connect time,
    /// before any join, because signaling relay works regardless of room
    /// membership.
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Drop the connection's channel. Called on disconnect.
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// Send to exactly one connection.
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// Send to every listed connection. Individual dead receivers are
    /// skipped, not treated as failure of the whole broadcast.
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
