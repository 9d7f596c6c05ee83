//! Shared utilities used by every layer.

pub mod logger;
pub mod time;
