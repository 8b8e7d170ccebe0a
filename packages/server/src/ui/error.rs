//! UI layer error types.

use std::{io, time::Duration};

use thiserror::Error;

/// A `ServerConfig` value the server cannot run with
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Sync interval must be greater than zero")]
    ZeroSyncInterval,

    #[error("Outbound queue capacity must be at least 1")]
    ZeroOutboundCapacity,

    #[error("Write timeout must be greater than zero, got {0:?}")]
    ZeroWriteTimeout(Duration),
}

/// Errors that stop the server from serving
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
