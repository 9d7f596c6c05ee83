//! HTTP endpoint handlers: the join page and the read-only rooms API.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};

use crate::infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto};

use super::super::state::AppState;

const MEETING_PAGE: &str = "static/meeting.html";

/// Minimal email shape check for the join page. The WebSocket join event
/// deliberately does not re-validate; identity there is free text.
fn is_valid_email(raw: &str) -> bool {
    let mut parts = raw.splitn(2, '@');
    match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => !local.is_empty() && domain.contains('.'),
        _ => false,
    }
}

/// `GET /join/{email}/{code}`: validate, upper-case the code, eagerly
/// create the room and serve the meeting page.
pub async fn join_page(
    State(state): State<Arc<AppState>>,
    Path((email, code)): Path<(String, String)>,
) -> Result<Html<String>, StatusCode> {
    if !is_valid_email(&email) {
        return Err(StatusCode::BAD_REQUEST);
    }

    let room = state
        .room_directory_usecase
        .prepare_room(code)
        .await
        .map_err(|e| {
            tracing::warn!("Rejected join page request: {}", e);
            StatusCode::BAD_REQUEST
        })?;
    tracing::info!(
        "Join page served for '{}' in room {}",
        email,
        room.code.as_str()
    );

    let page = tokio::fs::read_to_string(MEETING_PAGE).await.map_err(|e| {
        tracing::error!("Failed to read meeting page: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Html(page))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let mut summaries: Vec<RoomSummaryDto> = state
        .room_directory_usecase
        .list_rooms()
        .await
        .iter()
        .map(RoomSummaryDto::from)
        .collect();
    // Sort by code for consistent ordering
    summaries.sort_by(|a, b| a.code.cmp(&b.code));

    Json(summaries)
}

/// Get room detail by code
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room = state
        .room_directory_usecase
        .find_room(code)
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(RoomDetailDto::from(&room)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_address_is_valid() {
        assert!(is_valid_email("user@example.com"));
    }

    #[test]
    fn test_missing_at_sign_is_invalid() {
        assert!(!is_valid_email("user.example.com"));
    }

    #[test]
    fn test_empty_local_part_is_invalid() {
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_domain_without_dot_is_invalid() {
        assert!(!is_valid_email("user@localhost"));
    }
}
