//! WebRTC signaling relay library.
//!
//! This library implements a room-based signaling server: clients discover
//! each other inside a named room, exchange SDP offer/answer and ICE
//! candidate messages, and broadcast chat text and presence counts over
//! WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
