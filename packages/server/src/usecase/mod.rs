//! UseCase layer: one struct per relay event.
//!
//! Every usecase that mutates the store or fans out messages runs inside the
//! shared `EventSequencer`, so each connection observes events in the order
//! the server processed them.

mod connect_player;
mod disconnect_player;
mod error;
mod get_players;
mod relay_message;
mod sequencer;
mod sync_players;

pub use connect_player::ConnectPlayerUseCase;
pub use disconnect_player::DisconnectPlayerUseCase;
pub use error::{ConnectError, DisconnectError, RelayError, SyncError};
pub use get_players::GetPlayersUseCase;
pub use relay_message::{RelayMessageUseCase, RelayOutcome};
pub use sequencer::EventSequencer;
pub use sync_players::SyncPlayersUseCase;
