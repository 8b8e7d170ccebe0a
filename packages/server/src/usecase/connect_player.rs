//! UseCase: プレイヤー接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectPlayerUseCase::execute() メソッド
//! - ID の採番（衝突時の再生成）、初期状態の登録、assignId と playersUpdate の送信
//!
//! ### なぜこのテストが必要か
//! - 新規プレイヤーが自分の ID と出現位置を最初に受け取ることを保証する
//! - 既存のプレイヤー全員が新規プレイヤーの存在を即座に知ることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規プレイヤーの接続
//! - エッジケース：生成した ID が既存のプレイヤーと衝突する
//! - 異常系：再生成しても衝突し続ける

use std::sync::Arc;

use crate::{
    domain::{
        MessagePusher, PlayerId, PlayerIdGenerator, PlayerRepository, PlayerState, PusherChannel,
        SpawnArea, UuidPlayerIdGenerator,
    },
    infrastructure::dto::websocket::AssignIdMessage,
};

use super::{error::ConnectError, sequencer::EventSequencer, sync_players::broadcast_snapshot};

/// 衝突時に ID を再生成する最大回数
pub const MAX_ID_ATTEMPTS: u32 = 8;

/// プレイヤー接続のユースケース
pub struct ConnectPlayerUseCase {
    repository: Arc<dyn PlayerRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<EventSequencer>,
    id_generator: Arc<dyn PlayerIdGenerator>,
    spawn_area: SpawnArea,
}

impl ConnectPlayerUseCase {
    /// 新しい ConnectPlayerUseCase を作成
    pub fn new(
        repository: Arc<dyn PlayerRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<EventSequencer>,
        spawn_area: SpawnArea,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            sequencer,
            id_generator: Arc::new(UuidPlayerIdGenerator),
            spawn_area,
        }
    }

    /// Replace the ID source.
    pub fn with_id_generator(mut self, id_generator: Arc<dyn PlayerIdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// プレイヤー接続を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 新しい接続の送信キュー
    ///
    /// # Returns
    ///
    /// * `Ok(PlayerId)` - 採番された ID
    /// * `Err(ConnectError)` - 接続失敗（ストアは変更されない）
    pub async fn execute(&self, sender: PusherChannel) -> Result<PlayerId, ConnectError> {
        let _guard = self.sequencer.enter().await;

        // 1. 接続中のプレイヤーと衝突しない ID を採番
        let player_id = self.generate_unique_id().await?;

        // 2. 初期状態を生成
        let state = PlayerState::spawn(&mut rand::thread_rng(), &self.spawn_area);
        let assign_json = serde_json::to_string(&AssignIdMessage::new(&player_id, &state))
            .map_err(|e| ConnectError::Serialization(e.to_string()))?;

        // 3. Repository に登録
        self.repository.add_player(player_id.clone(), state).await?;

        // 4. MessagePusher に送信キューを登録
        self.message_pusher
            .register_client(player_id.clone(), sender)
            .await;

        // 5. 本人にだけ ID と初期状態を通知
        if let Err(e) = self.message_pusher.push_to(&player_id, &assign_json).await {
            tracing::warn!("Failed to send assignId to '{}': {}", player_id, e);
        }

        // 6. 本人を含む全員に full-sync
        if let Err(e) = broadcast_snapshot(&*self.repository, &*self.message_pusher).await {
            tracing::warn!("Failed to broadcast full-sync after join: {}", e);
        }

        tracing::info!("Player '{}' joined", player_id);

        Ok(player_id)
    }

    async fn generate_unique_id(&self) -> Result<PlayerId, ConnectError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let candidate = self.id_generator.next_id();
            if !self.repository.contains_player(&candidate).await {
                return Ok(candidate);
            }
            tracing::warn!(
                "Generated player ID '{}' collides with a connected player (attempt {}/{})",
                candidate,
                attempt,
                MAX_ID_ATTEMPTS
            );
        }
        Err(ConnectError::IdExhausted(MAX_ID_ATTEMPTS))
    }
}
