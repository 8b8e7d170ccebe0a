//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信（通知）のインターフェース。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, PlayerId};

/// Outbound queue of a single connection.
///
/// Bounded so that a slow reader can never make a broadcast wait.
pub type PusherChannel = mpsc::Sender<String>;

/// MessagePusher trait
///
/// Delivery is best-effort: a connection that cannot take a message right now
/// is skipped, never waited on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントを登録
    async fn register_client(&self, player_id: PlayerId, sender: PusherChannel);

    /// クライアントの登録を解除
    async fn unregister_client(&self, player_id: &PlayerId);

    /// 特定のクライアントにメッセージを送信
    async fn push_to(&self, player_id: &PlayerId, content: &str) -> Result<(), MessagePushError>;

    /// 複数のクライアントにメッセージを送信し、配送できた数を返す
    ///
    /// 一部のクライアントへの送信失敗は許容します。
    async fn broadcast(&self, targets: Vec<PlayerId>, content: &str) -> usize;
}
