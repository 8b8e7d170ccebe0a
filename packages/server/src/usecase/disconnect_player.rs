//! UseCase: プレイヤー切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectPlayerUseCase::execute() メソッド
//! - ストアからの削除、送信キューの登録解除、残りのプレイヤーへの通知
//!
//! ### なぜこのテストが必要か
//! - 切断したプレイヤーのエントリが残らないことを保証する
//! - 残りのプレイヤー全員が playerDisconnected を受け取ることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：プレイヤーの切断と通知
//! - エッジケース：最後のプレイヤーの切断（通知対象なし）
//! - 異常系：接続していないプレイヤーの切断

use std::sync::Arc;

use crate::{
    domain::{MessagePusher, PlayerId, PlayerRepository},
    infrastructure::dto::websocket::PlayerDisconnectedMessage,
};

use super::{error::DisconnectError, sequencer::EventSequencer};

/// プレイヤー切断のユースケース
pub struct DisconnectPlayerUseCase {
    repository: Arc<dyn PlayerRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<EventSequencer>,
}

impl DisconnectPlayerUseCase {
    /// 新しい DisconnectPlayerUseCase を作成
    pub fn new(
        repository: Arc<dyn PlayerRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<EventSequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            sequencer,
        }
    }

    /// プレイヤー切断を実行
    ///
    /// # Arguments
    ///
    /// * `player_id` - 切断したプレイヤーの ID
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 削除と通知が完了
    /// * `Err(DisconnectError)` - 接続していないプレイヤー
    pub async fn execute(&self, player_id: &PlayerId) -> Result<(), DisconnectError> {
        let json = serde_json::to_string(&PlayerDisconnectedMessage::new(player_id))
            .map_err(|e| DisconnectError::Serialization(e.to_string()))?;

        let _guard = self.sequencer.enter().await;

        // 1. Repository から削除
        self.repository
            .remove_player(player_id)
            .await
            .map_err(|_| DisconnectError::PlayerNotFound(player_id.as_str().to_string()))?;

        // 2. MessagePusher から登録解除
        self.message_pusher.unregister_client(player_id).await;

        // 3. 残りの全員に通知
        let notify_targets = self.repository.get_all_player_ids().await;
        let delivered = self.message_pusher.broadcast(notify_targets, &json).await;

        tracing::info!(
            "Player '{}' left, notified {} remaining player(s)",
            player_id,
            delivered
        );

        Ok(())
    }
}
