//! Real-time multiplayer state-relay server.
//!
//! Holds the last-known state of every connected player and propagates it to
//! every other player, both immediately (per-message relay) and on a fixed
//! interval (full-sync snapshot).

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
