//! InMemory Repository 実装

mod player;

pub use player::InMemoryPlayerRepository;
