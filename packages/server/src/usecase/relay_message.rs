//! UseCase: メッセージ中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() メソッド
//! - update / shoot のストアへの反映と、送信者以外への生メッセージの中継
//!
//! ### なぜこのテストが必要か
//! - update は状態を丸ごと置き換え、shoot は bullets のみを置き換えることを保証する
//! - 中継メッセージが送信者に戻らないことを保証する
//! - 未知の種類は状態を変えずに中継されることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：update / shoot / 未知の種類
//! - 異常系：JSON として解釈できないメッセージ（破棄され、接続は維持される）

use std::sync::Arc;

use crate::{
    domain::{MessagePusher, PlayerId, PlayerRepository},
    infrastructure::dto::websocket::InboundMessage,
};

use super::{error::RelayError, sequencer::EventSequencer};

/// Result of relaying one inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayOutcome {
    /// Whether the sender's stored state changed
    pub state_changed: bool,
    /// Number of other players the raw message was queued for
    pub delivered: usize,
}

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    repository: Arc<dyn PlayerRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<EventSequencer>,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
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

    /// メッセージ中継を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信元の接続に割り当てられたプレイヤー ID
    /// * `raw` - 受信したテキストフレーム（そのまま中継される）
    ///
    /// # Returns
    ///
    /// * `Ok(RelayOutcome)` - 中継完了
    /// * `Err(RelayError)` - JSON として解釈できない（何も変更・送信しない）
    pub async fn execute(&self, sender: &PlayerId, raw: &str) -> Result<RelayOutcome, RelayError> {
        let inbound =
            InboundMessage::parse(raw).map_err(|e| RelayError::MalformedMessage(e.to_string()))?;

        let _guard = self.sequencer.enter().await;

        // 1. update / shoot を送信者の状態に反映
        let state_changed = match inbound.into_command(sender.clone()) {
            Some(command) => match self.repository.apply_command(command).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Failed to apply message from '{}': {}", sender, e);
                    false
                }
            },
            None => false,
        };

        // 2. 送信者以外の全員に生メッセージを中継
        let targets = self.get_broadcast_targets(sender).await;
        let delivered = self.message_pusher.broadcast(targets, raw).await;

        Ok(RelayOutcome {
            state_changed,
            delivered,
        })
    }

    /// 送信者以外の全てのプレイヤー ID を取得
    async fn get_broadcast_targets(&self, sender: &PlayerId) -> Vec<PlayerId> {
        self.repository
            .get_all_player_ids()
            .await
            .into_iter()
            .filter(|id| id != sender)
            .collect()
    }
}
