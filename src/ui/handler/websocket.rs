//! WebSocket connection handler: the signaling relay event loop.
//!
//! Each accepted connection gets a server-minted connection id and an
//! unbounded channel; a writer task drains the channel into the socket
//! while the reader loop dispatches inbound events. Every event is handled
//! independently; the only per-connection state transition is join and,
//! eventually, disconnect.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::domain::ConnectionId;
use crate::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use crate::usecase::error::SendChatError;

use super::super::state::AppState;

fn encode(event: &ServerEvent) -> String {
    serde_json::to_string(event).expect("ServerEvent is always serializable")
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // The transport assigns the connection id; clients never pick their own.
    let connection_id = ConnectionId::generate();
    tracing::info!("Connection '{}' accepted", connection_id.as_str());

    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

pub async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    // Register before any join: targeted relays must reach this connection
    // whether or not it ever joins a room.
    state
        .message_pusher
        .register_client(connection_id.clone(), tx)
        .await;

    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    match serde_json::from_str::<ClientEvent>(text.as_str()) {
                        Ok(event) => {
                            handle_event(&recv_state, &recv_connection_id, event).await;
                        }
                        Err(e) => {
                            // Malformed frames are dropped, never answered.
                            tracing::warn!(
                                "Dropping malformed event from '{}': {}",
                                recv_connection_id.as_str(),
                                e
                            );
                        }
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_connection_id.as_str());
                    break;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Pong is handled by the protocol layer.
                }
                _ => {}
            }
        }
    });

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    handle_disconnect(&state, &connection_id).await;
}

/// Dispatch one validated inbound event.
async fn handle_event(state: &Arc<AppState>, connection_id: &ConnectionId, event: ClientEvent) {
    match event {
        ClientEvent::JoinRoom {
            room_code,
            user_email,
        } => {
            handle_join_room(state, connection_id, room_code, user_email).await;
        }
        ClientEvent::Offer { offer, to } => {
            let event = ServerEvent::Offer {
                offer,
                from: connection_id.as_str().to_string(),
            };
            relay_to(state, connection_id, to, event).await;
        }
        ClientEvent::Answer { answer, to } => {
            let event = ServerEvent::Answer {
                answer,
                from: connection_id.as_str().to_string(),
            };
            relay_to(state, connection_id, to, event).await;
        }
        ClientEvent::IceCandidate { candidate, to } => {
            let event = ServerEvent::IceCandidate {
                candidate,
                from: connection_id.as_str().to_string(),
            };
            relay_to(state, connection_id, to, event).await;
        }
        ClientEvent::ChatMessage {
            message,
            sender_email,
            room_code,
        } => {
            handle_chat_message(state, connection_id, room_code, message, sender_email).await;
        }
    }
}

async fn handle_join_room(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    room_code: String,
    user_email: String,
) {
    match state
        .join_room_usecase
        .execute(connection_id, room_code, user_email)
        .await
    {
        Ok(outcome) => {
            let joined = encode(&ServerEvent::UserJoined {
                socket_id: connection_id.as_str().to_string(),
                user_email: outcome.user_email.as_str().to_string(),
            });
            if let Err(e) = state
                .join_room_usecase
                .broadcast_user_joined(outcome.peers, &joined)
                .await
            {
                tracing::warn!("Failed to broadcast user-joined: {}", e);
            }

            let count = encode(&ServerEvent::ParticipantsUpdate {
                count: outcome.participant_count,
            });
            if let Err(e) = state
                .join_room_usecase
                .broadcast_participant_count(outcome.members, &count)
                .await
            {
                tracing::warn!("Failed to broadcast participants-update: {}", e);
            }

            tracing::info!(
                "'{}' joined room {}",
                outcome.user_email.as_str(),
                outcome.room_code.as_str()
            );
        }
        Err(e) => {
            // Reported to the originating connection only; the connection
            // stays open and no other participant hears about it.
            tracing::warn!("Join failed for '{}': {}", connection_id.as_str(), e);
            let error = encode(&ServerEvent::Error {
                message: e.to_string(),
            });
            state
                .join_room_usecase
                .notify_join_failed(connection_id, &error)
                .await;
        }
    }
}

async fn relay_to(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    to: String,
    event: ServerEvent,
) {
    let target = match ConnectionId::new(to) {
        Ok(target) => target,
        Err(e) => {
            tracing::warn!(
                "Dropping relay with invalid target from '{}': {}",
                connection_id.as_str(),
                e
            );
            return;
        }
    };

    let payload = encode(&event);
    if let Err(e) = state.relay_signal_usecase.execute(&target, &payload).await {
        // Fire-and-forget: an unreachable target is the sender's problem.
        tracing::debug!(
            "Relay from '{}' to '{}' not delivered: {}",
            connection_id.as_str(),
            target.as_str(),
            e
        );
    }
}

async fn handle_chat_message(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    room_code: String,
    message: String,
    sender_email: String,
) {
    match state
        .send_chat_message_usecase
        .execute(room_code, message, sender_email)
        .await
    {
        Ok(outcome) => {
            let payload = encode(&ServerEvent::from(outcome.message));
            if let Err(e) = state
                .send_chat_message_usecase
                .broadcast_chat_message(outcome.recipients, &payload)
                .await
            {
                tracing::warn!("Failed to broadcast chat-message: {}", e);
            }
        }
        Err(SendChatError::RoomNotFound(code)) => {
            tracing::debug!(
                "Dropping chat from '{}' into nonexistent room '{}'",
                connection_id.as_str(),
                code
            );
        }
        Err(e) => {
            tracing::warn!(
                "Dropping malformed chat event from '{}': {}",
                connection_id.as_str(),
                e
            );
        }
    }
}

async fn handle_disconnect(state: &Arc<AppState>, connection_id: &ConnectionId) {
    tracing::info!("Connection '{}' disconnected", connection_id.as_str());

    let Some(outcome) = state
        .disconnect_participant_usecase
        .execute(connection_id)
        .await
    else {
        return;
    };

    let left = encode(&ServerEvent::UserLeft {
        socket_id: connection_id.as_str().to_string(),
        user_email: outcome.user_email.as_str().to_string(),
    });
    if let Err(e) = state
        .disconnect_participant_usecase
        .broadcast_user_left(outcome.remaining_members.clone(), &left)
        .await
    {
        tracing::warn!("Failed to broadcast user-left: {}", e);
    }

    let count = encode(&ServerEvent::ParticipantsUpdate {
        count: outcome.remaining_count,
    });
    if let Err(e) = state
        .disconnect_participant_usecase
        .broadcast_participant_count(outcome.remaining_members, &count)
        .await
    {
        tracing::warn!("Failed to broadcast participants-update: {}", e);
    }

    tracing::info!(
        "'{}' left room {}",
        outcome.user_email.as_str(),
        outcome.room_code.as_str()
    );
}
