//! Concrete `SignalingRepository` implementations.

pub mod inmemory;

pub use inmemory::InMemorySignalingRepository;
