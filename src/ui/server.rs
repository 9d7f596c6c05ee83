//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::domain::MessagePusher;
use crate::usecase::{
    DisconnectParticipantUseCase, JoinRoomUseCase, RelaySignalUseCase, RoomDirectoryUseCase,
    SendChatMessageUseCase,
};

use super::{
    handler::{
        http::{get_room_detail, get_rooms, health_check, join_page},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// WebRTC signaling server.
///
/// Encapsulates the wired usecases and runs the axum application.
pub struct Server {
    join_room_usecase: Arc<JoinRoomUseCase>,
    relay_signal_usecase: Arc<RelaySignalUseCase>,
    send_chat_message_usecase: Arc<SendChatMessageUseCase>,
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    room_directory_usecase: Arc<RoomDirectoryUseCase>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl Server {
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        relay_signal_usecase: Arc<RelaySignalUseCase>,
        send_chat_message_usecase: Arc<SendChatMessageUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        room_directory_usecase: Arc<RoomDirectoryUseCase>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            join_room_usecase,
            relay_signal_usecase,
            send_chat_message_usecase,
            disconnect_participant_usecase,
            room_directory_usecase,
            message_pusher,
        }
    }

    /// Run the signaling server.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 5000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            join_room_usecase: self.join_room_usecase,
            relay_signal_usecase: self.relay_signal_usecase,
            send_chat_message_usecase: self.send_chat_message_usecase,
            disconnect_participant_usecase: self.disconnect_participant_usecase,
            room_directory_usecase: self.room_directory_usecase,
            message_pusher: self.message_pusher,
        });

        let app = Router::new()
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/join/{email}/{code}", get(join_page))
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{code}", get(get_room_detail))
            // Landing page and assets
            .fallback_service(ServeDir::new("static"))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Signaling server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Join meetings at: http://{}/join/user@example.com/ROOM123", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
