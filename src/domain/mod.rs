//! Domain layer: value objects, entities and the interfaces the rest of the
//! application depends on (dependency inversion).

pub mod entity;
pub mod pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, ParticipantEntry, RemovedParticipant, Room};
pub use pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use repository::{RepositoryError, SignalingRepository};
pub use value_object::{ConnectionId, MessageContent, RoomCode, Timestamp, UserEmail, ValidationError};
