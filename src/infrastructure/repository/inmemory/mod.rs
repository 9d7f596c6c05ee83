//! In-memory repository implementation.

pub mod signaling;

pub use signaling::InMemorySignalingRepository;
