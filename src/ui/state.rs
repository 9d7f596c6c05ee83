//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::domain::MessagePusher;
use crate::usecase::{
    DisconnectParticipantUseCase, JoinRoomUseCase, RelaySignalUseCase, RoomDirectoryUseCase,
    SendChatMessageUseCase,
};

/// Explicitly constructed, dependency-injected state container. Handlers
/// reach the registry and the participant index only through the usecases,
/// never as ambient global state.
pub struct AppState {
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub relay_signal_usecase: Arc<RelaySignalUseCase>,
    pub send_chat_message_usecase: Arc<SendChatMessageUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub room_directory_usecase: Arc<RoomDirectoryUseCase>,
    /// Connection lifecycle (register at accept, unregister at close) lives
    /// with the transport, not with any room operation.
    pub message_pusher: Arc<dyn MessagePusher>,
}
