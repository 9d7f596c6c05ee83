//! WebSocket-backed `MessagePusher` implementation.
//!
//! Holds the `UnboundedSender` for every live connection. WebSocket
//! acceptance itself happens in the UI layer; this implementation only
//! manages the senders and performs the actual pushes, which keeps
//! "accepting a connection" and "delivering a message" separate concerns.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// Delivery over per-connection mpsc channels.
pub struct WebSocketMessagePusher {
    /// Connection id to that connection's writer channel.
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Connection '{}' registered to pusher", connection_id.as_str());
        clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from pusher",
            connection_id.as_str()
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.as_str().to_string()))?;

        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to '{}'", connection_id.as_str());
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for target in &targets {
            match clients.get(target) {
                Some(sender) => {
                    if sender.send(content.to_string()).is_err() {
                        // Dead receiver; the disconnect path will clean it up.
                        tracing::warn!("Failed to push broadcast to '{}'", target.as_str());
                    }
                }
                None => {
                    tracing::warn!("Broadcast target '{}' is not connected", target.as_str());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn create_test_pusher() -> (
        WebSocketMessagePusher,
        Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
    ) {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        (WebSocketMessagePusher::new(clients.clone()), clients)
    }

    fn conn(raw: &str) -> ConnectionId {
        ConnectionId::new(raw.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_push_to_delivers_to_registered_client() {
        let (pusher, _clients) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_client(conn("c1"), tx).await;

        pusher.push_to(&conn("c1"), "hello").await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_push_to_unknown_client_fails() {
        let (pusher, _clients) = create_test_pusher();

        let result = pusher.push_to(&conn("ghost"), "hello").await;

        assert_eq!(
            result,
            Err(MessagePushError::ClientNotFound("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_push_to_unregistered_client_fails() {
        let (pusher, _clients) = create_test_pusher();
        let (tx, _rx) = mpsc::unbounded_channel();
        pusher.register_client(conn("c1"), tx).await;

        pusher.unregister_client(&conn("c1")).await;
        let result = pusher.push_to(&conn("c1"), "hello").await;

        assert_eq!(
            result,
            Err(MessagePushError::ClientNotFound("c1".to_string()))
        );
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_targets() {
        let (pusher, _clients) = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_client(conn("c1"), tx1).await;
        pusher.register_client(conn("c2"), tx2).await;

        pusher
            .broadcast(vec![conn("c1"), conn("c2")], "hi all")
            .await
            .unwrap();

        assert_eq!(rx1.recv().await.unwrap(), "hi all");
        assert_eq!(rx2.recv().await.unwrap(), "hi all");
    }

    #[tokio::test]
    async fn test_broadcast_skips_dead_and_unknown_targets() {
        let (pusher, _clients) = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        pusher.register_client(conn("c1"), tx1).await;
        pusher.register_client(conn("c2"), tx2).await;
        drop(rx2); // dead receiver

        let result = pusher
            .broadcast(vec![conn("c1"), conn("c2"), conn("ghost")], "hi")
            .await;

        // Fire-and-forget: the broadcast as a whole still succeeds.
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await.unwrap(), "hi");
    }
}
