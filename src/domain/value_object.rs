//! Value objects for the signaling domain.
//!
//! Every identifier that crosses the transport boundary is wrapped in a
//! newtype validated at construction, so the core logic never sees a raw,
//! unchecked string.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation failures raised when constructing a value object from raw input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("room code must not be empty")]
    EmptyRoomCode,
    #[error("room code must be alphanumeric: '{0}'")]
    MalformedRoomCode(String),
    #[error("user email must not be empty")]
    EmptyUserEmail,
    #[error("connection id must not be empty")]
    EmptyConnectionId,
}

/// Uppercase room identifier, the registry key.
///
/// Codes are normalized to uppercase at construction, so lookups against the
/// registry are exact matches on the stored form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    pub fn new(raw: String) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyRoomCode);
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::MalformedRoomCode(raw));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Transport-assigned identifier for one live connection.
///
/// Generated server-side at WebSocket upgrade; never reused while the
/// connection is open. Client-supplied relay targets (`to` fields) are parsed
/// through [`ConnectionId::new`] so an empty target is rejected at the
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(raw: String) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::EmptyConnectionId);
        }
        Ok(Self(raw))
    }

    /// Mint a fresh connection identifier for a newly accepted transport
    /// connection.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Client-supplied identity string.
///
/// Free text by design: uniqueness within a room is not enforced. Format
/// validation beyond non-emptiness only happens on the HTTP join page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserEmail(String);

impl UserEmail {
    pub fn new(raw: String) -> Result<Self, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::EmptyUserEmail);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Chat message body. Free text, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Unix timestamp in UTC milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
