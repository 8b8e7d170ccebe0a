//! Domain error types.

use thiserror::Error;

/// Errors raised while constructing domain value objects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueObjectError {
    #[error("Player ID must not be empty")]
    EmptyPlayerId,

    #[error("Invalid spawn area {min}..{max}: bounds must be finite with min < max")]
    InvalidSpawnArea { min: f64, max: f64 },
}

/// Errors raised by a `PlayerRepository` implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RepositoryError {
    #[error("Player '{0}' already exists")]
    DuplicatePlayer(String),

    #[error("Player '{0}' not found")]
    PlayerNotFound(String),

    #[error("State of player '{0}' is not a JSON object")]
    StateNotObject(String),
}

/// Errors raised by a `MessagePusher` implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
