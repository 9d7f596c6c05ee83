//! UI layer: HTTP and WebSocket surface built with axum.

mod handler;
mod server;
mod signal;
mod state;

pub use server::Server;
pub use state::AppState;
