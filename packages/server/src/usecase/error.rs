//! UseCase error types.

use thiserror::Error;

use crate::domain::RepositoryError;

/// Errors while admitting a new player
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConnectError {
    #[error("Could not generate a unique player ID after {0} attempts")]
    IdExhausted(u32),

    #[error("Failed to store player: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Failed to serialize message: {0}")]
    Serialization(String),
}

/// Errors while handling an inbound message
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RelayError {
    #[error("Malformed message: {0}")]
    MalformedMessage(String),
}

/// Errors while removing a player
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DisconnectError {
    #[error("Player '{0}' is not connected")]
    PlayerNotFound(String),

    #[error("Failed to serialize message: {0}")]
    Serialization(String),
}

/// Errors while broadcasting a full-sync snapshot
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("Failed to serialize message: {0}")]
    Serialization(String),
}
