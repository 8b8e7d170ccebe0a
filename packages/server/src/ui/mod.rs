//! WebSocket relay server: routing, connection handling and the full-sync ticker.

mod config;
mod error;
mod handler;
mod server;
mod signal;
pub mod state;
mod ticker;

pub use config::ServerConfig;
pub use error::{ConfigError, ServerError};
pub use server::Server;
