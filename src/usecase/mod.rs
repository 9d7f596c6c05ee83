//! UseCase layer: one struct per inbound operation, each depending only on
//! the domain interfaces (`SignalingRepository`, `MessagePusher`).

pub mod disconnect_participant;
pub mod error;
pub mod join_room;
pub mod relay_signal;
pub mod room_directory;
pub mod send_chat_message;

pub use disconnect_participant::{DisconnectOutcome, DisconnectParticipantUseCase};
pub use error::{JoinRoomError, SendChatError};
pub use join_room::{JoinOutcome, JoinRoomUseCase};
pub use relay_signal::RelaySignalUseCase;
pub use room_directory::RoomDirectoryUseCase;
pub use send_chat_message::{ChatOutcome, SendChatMessageUseCase};
