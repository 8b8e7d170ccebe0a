//! Server state shared by the handlers.

use std::{sync::Arc, time::Duration};

use crate::usecase::{
    ConnectPlayerUseCase, DisconnectPlayerUseCase, GetPlayersUseCase, RelayMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectPlayerUseCase（プレイヤー接続のユースケース）
    pub connect_player_usecase: Arc<ConnectPlayerUseCase>,
    /// RelayMessageUseCase（メッセージ中継のユースケース）
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    /// DisconnectPlayerUseCase（プレイヤー切断のユースケース）
    pub disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
    /// GetPlayersUseCase（全プレイヤーの状態取得のユースケース）
    pub get_players_usecase: Arc<GetPlayersUseCase>,
    /// Capacity of each connection's outbound queue
    pub outbound_capacity: usize,
    /// Per-write socket timeout
    pub write_timeout: Duration,
}
