//! UseCase: 定期 full-sync 処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SyncPlayersUseCase::execute() メソッド
//! - 全プレイヤーの状態のスナップショットを全接続に送信する
//!
//! ### なぜこのテストが必要か
//! - 中継で取りこぼしたメッセージがあっても、次の tick で全員の状態が揃うことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数プレイヤー接続中の full-sync
//! - エッジケース：接続中のプレイヤーがいない（何も送らない）

use std::sync::Arc;

use crate::{
    domain::{MessagePusher, PlayerId, PlayerRepository},
    infrastructure::dto::websocket::PlayersUpdateMessage,
};

use super::{error::SyncError, sequencer::EventSequencer};

/// Send the whole current store to every connected player.
///
/// Returns the number of connections the snapshot was queued for. Callers
/// must already hold the `EventSequencer`.
pub(super) async fn broadcast_snapshot(
    repository: &dyn PlayerRepository,
    message_pusher: &dyn MessagePusher,
) -> Result<usize, SyncError> {
    let snapshot = repository.snapshot().await;
    if snapshot.is_empty() {
        return Ok(0);
    }

    let targets: Vec<PlayerId> = snapshot.keys().cloned().collect();
    let json = serde_json::to_string(&PlayersUpdateMessage::from(snapshot))
        .map_err(|e| SyncError::Serialization(e.to_string()))?;

    Ok(message_pusher.broadcast(targets, &json).await)
}

/// 定期 full-sync のユースケース
pub struct SyncPlayersUseCase {
    repository: Arc<dyn PlayerRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<EventSequencer>,
}

impl SyncPlayersUseCase {
    /// 新しい SyncPlayersUseCase を作成
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

    /// full-sync を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - スナップショットを送信できた接続数
    /// * `Err(SyncError)` - 直列化に失敗
    pub async fn execute(&self) -> Result<usize, SyncError> {
        let _guard = self.sequencer.enter().await;
        broadcast_snapshot(&*self.repository, &*self.message_pusher).await
    }
}
