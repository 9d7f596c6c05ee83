//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Summary of one room for `GET /api/rooms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub code: String,
    pub participant_count: usize,
    pub message_count: usize,
    /// RFC 3339 creation time.
    pub created_at: String,
}

/// Detailed view of one room for `GET /api/rooms/{code}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub code: String,
    pub participants: Vec<ParticipantDetailDto>,
    pub message_count: usize,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDetailDto {
    pub socket_id: String,
    pub user_email: String,
}
