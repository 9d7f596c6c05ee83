//! WebRTC signaling server binary.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000
//! PORT=8080 cargo run --bin server
//! ```

use std::{collections::HashMap, sync::Arc};

use atrium::{
    common::{logger::setup_logger, time::SystemClock},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemorySignalingRepository,
    },
    ui::Server,
    usecase::{
        DisconnectParticipantUseCase, JoinRoomUseCase, RelaySignalUseCase, RoomDirectoryUseCase,
        SendChatMessageUseCase,
    },
};
use clap::Parser;
use tokio::sync::Mutex;

fn default_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(5000)
}

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "WebRTC signaling relay server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to (defaults to $PORT, then 5000)
    #[arg(short = 'p', long, default_value_t = default_port())]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Clock + Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    let clock = Arc::new(SystemClock);
    let repository = Arc::new(InMemorySignalingRepository::new(clock.clone()));

    let pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(pusher_clients));

    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let relay_signal_usecase = Arc::new(RelaySignalUseCase::new(message_pusher.clone()));
    let send_chat_message_usecase = Arc::new(SendChatMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock,
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let room_directory_usecase = Arc::new(RoomDirectoryUseCase::new(repository));

    let server = Server::new(
        join_room_usecase,
        relay_signal_usecase,
        send_chat_message_usecase,
        disconnect_participant_usecase,
        room_directory_usecase,
        message_pusher,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
