//! Domain layer: player identity, player state and the interfaces the
//! usecases depend on.

mod command;
mod error;
mod message_pusher;
mod player;
mod repository;

pub use command::PlayerCommand;
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use player::{
    PlayerId, PlayerIdFactory, PlayerIdGenerator, PlayerSnapshot, PlayerState, SpawnArea,
    UuidPlayerIdGenerator,
};
pub use repository::PlayerRepository;

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
#[cfg(test)]
pub use repository::MockPlayerRepository;
