//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    domain::{MessagePusher, PlayerRepository},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryPlayerRepository},
    usecase::{
        ConnectPlayerUseCase, DisconnectPlayerUseCase, EventSequencer, GetPlayersUseCase,
        RelayMessageUseCase, SyncPlayersUseCase,
    },
};

use super::{
    config::ServerConfig,
    error::ServerError,
    handler::{debug_players, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
    ticker::spawn_sync_ticker,
};

/// WebSocket state-relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::in_memory(ServerConfig::default());
/// server.run().await?;
/// ```
pub struct Server {
    /// ConnectPlayerUseCase（プレイヤー接続のユースケース）
    connect_player_usecase: Arc<ConnectPlayerUseCase>,
    /// RelayMessageUseCase（メッセージ中継のユースケース）
    relay_message_usecase: Arc<RelayMessageUseCase>,
    /// DisconnectPlayerUseCase（プレイヤー切断のユースケース）
    disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
    /// SyncPlayersUseCase（定期 full-sync のユースケース）
    sync_players_usecase: Arc<SyncPlayersUseCase>,
    /// GetPlayersUseCase（全プレイヤーの状態取得のユースケース）
    get_players_usecase: Arc<GetPlayersUseCase>,
    config: ServerConfig,
}

impl Server {
    /// Create a new Server instance from already wired usecases
    pub fn new(
        connect_player_usecase: Arc<ConnectPlayerUseCase>,
        relay_message_usecase: Arc<RelayMessageUseCase>,
        disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
        sync_players_usecase: Arc<SyncPlayersUseCase>,
        get_players_usecase: Arc<GetPlayersUseCase>,
        config: ServerConfig,
    ) -> Self {
        Self {
            connect_player_usecase,
            relay_message_usecase,
            disconnect_player_usecase,
            sync_players_usecase,
            get_players_usecase,
            config,
        }
    }

    /// Wire a server backed by the in-memory store and WebSocket pusher
    pub fn in_memory(config: ServerConfig) -> Self {
        // Initialize dependencies in order:
        // 1. Repository
        // 2. MessagePusher
        // 3. EventSequencer
        // 4. UseCases

        // 1. Create Repository (in-memory, lives as long as the process)
        let repository: Arc<dyn PlayerRepository> = Arc::new(InMemoryPlayerRepository::default());

        // 2. Create MessagePusher (WebSocket implementation)
        let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::default());

        // 3. One sequencer shared by every event
        let sequencer = Arc::new(EventSequencer::new());

        // 4. Create UseCases
        let connect_player_usecase = Arc::new(ConnectPlayerUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            sequencer.clone(),
            config.spawn_area.clone(),
        ));
        let relay_message_usecase = Arc::new(RelayMessageUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            sequencer.clone(),
        ));
        let disconnect_player_usecase = Arc::new(DisconnectPlayerUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            sequencer.clone(),
        ));
        let sync_players_usecase = Arc::new(SyncPlayersUseCase::new(
            repository.clone(),
            message_pusher,
            sequencer,
        ));
        let get_players_usecase = Arc::new(GetPlayersUseCase::new(repository));

        Self::new(
            connect_player_usecase,
            relay_message_usecase,
            disconnect_player_usecase,
            sync_players_usecase,
            get_players_usecase,
            config,
        )
    }

    /// Bind to the configured host and port and serve until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), ServerError> {
        self.config.validate()?;
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` without serving if the configuration is
    /// invalid.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.config.validate()?;

        let app_state = Arc::new(AppState {
            connect_player_usecase: self.connect_player_usecase,
            relay_message_usecase: self.relay_message_usecase,
            disconnect_player_usecase: self.disconnect_player_usecase,
            get_players_usecase: self.get_players_usecase,
            outbound_capacity: self.config.outbound_capacity,
            write_timeout: self.config.write_timeout,
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/debug/players", get(debug_players))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        let local_addr = listener.local_addr()?;
        tracing::info!("WebSocket relay server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);
        tracing::info!(
            "Full-sync every {:?}, outbound queue {} messages, write timeout {:?}",
            self.config.sync_interval,
            self.config.outbound_capacity,
            self.config.write_timeout
        );

        let ticker = spawn_sync_ticker(self.sync_players_usecase, self.config.sync_interval);

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        ticker.abort();
        tracing::info!("Server shutdown complete");

        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ConfigError;
    use std::time::Duration;

    #[tokio::test]
    async fn test_serve_refuses_invalid_config() {
        // テスト項目: 不正な設定では ticker を起動せずにエラーで終了する
        // given (前提条件):
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server = Server::in_memory(ServerConfig {
            sync_interval: Duration::ZERO,
            ..ServerConfig::default()
        });

        // when (操作):
        let result = tokio::time::timeout(
            Duration::from_secs(1),
            server.serve(listener, std::future::pending()),
        )
        .await
        .expect("serve should return immediately");

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ServerError::Config(ConfigError::ZeroSyncInterval))
        ));
    }
}
