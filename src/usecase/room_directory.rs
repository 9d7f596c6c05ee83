//! UseCase: registry queries for the HTTP surface.
//!
//! The join page eagerly creates the room so the first WebSocket joiner
//! finds it; the JSON API exposes read-only snapshots.

use std::sync::Arc;

use crate::domain::{Room, RoomCode, SignalingRepository, ValidationError};

pub struct RoomDirectoryUseCase {
    repository: Arc<dyn SignalingRepository>,
}

impl RoomDirectoryUseCase {
    pub fn new(repository: Arc<dyn SignalingRepository>) -> Self {
        Self { repository }
    }

    /// Get-or-create for the HTTP join page. The raw code is validated and
    /// upper-cased on the way in.
    pub async fn prepare_room(&self, raw_code: String) -> Result<Room, ValidationError> {
        let code = RoomCode::new(raw_code)?;
        Ok(self.repository.get_or_create_room(code).await)
    }

    /// Snapshot of every room in the registry.
    pub async fn list_rooms(&self) -> Vec<Room> {
        self.repository.list_rooms().await
    }

    /// Pure lookup; never creates.
    pub async fn find_room(&self, raw_code: String) -> Result<Option<Room>, ValidationError> {
        let code = RoomCode::new(raw_code)?;
        Ok(self.repository.find_room(&code).await)
    }
}
