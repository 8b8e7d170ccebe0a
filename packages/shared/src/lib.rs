//! Shared utilities for the Arena Relay workspace.

pub mod logger;
