//! WebSocket event DTOs.
//!
//! Every inbound frame is one JSON object tagged by `type`. Deserializing
//! into [`ClientEvent`] is the schema check at the boundary: frames that do
//! not match any variant are dropped by the handler without reaching the
//! core logic. Signaling payloads (`offer`, `answer`, `candidate`) are
//! carried as opaque `serde_json::Value` so the relay forwards them
//! byte-faithfully.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound events (client to server).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    #[serde(rename = "join-room", rename_all = "camelCase")]
    JoinRoom { room_code: String, user_email: String },

    #[serde(rename = "offer")]
    Offer { offer: Value, to: String },

    #[serde(rename = "answer")]
    Answer { answer: Value, to: String },

    #[serde(rename = "ice-candidate")]
    IceCandidate { candidate: Value, to: String },

    #[serde(rename = "chat-message", rename_all = "camelCase")]
    ChatMessage {
        message: String,
        sender_email: String,
        room_code: String,
    },
}

/// Outbound events (server to one or more clients).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    #[serde(rename = "user-joined", rename_all = "camelCase")]
    UserJoined {
        socket_id: String,
        user_email: String,
    },

    #[serde(rename = "participants-update")]
    ParticipantsUpdate { count: usize },

    #[serde(rename = "offer")]
    Offer { offer: Value, from: String },

    #[serde(rename = "answer")]
    Answer { answer: Value, from: String },

    #[serde(rename = "ice-candidate")]
    IceCandidate { candidate: Value, from: String },

    #[serde(rename = "chat-message", rename_all = "camelCase")]
    ChatMessage {
        text: String,
        sender_email: String,
        timestamp: i64,
    },

    #[serde(rename = "user-left", rename_all = "camelCase")]
    UserLeft {
        socket_id: String,
        user_email: String,
    },

    #[serde(rename = "error")]
    Error { message: String },
}
