//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信キュー（`PusherChannel`）を管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成と実際のソケット書き込みは UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装はキューへの投入だけを行い、`try_send` で決して待ちません。
//! キューが満杯または閉じている接続は、その接続に対してだけスキップされます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::domain::{MessagePushError, MessagePusher, PlayerId, PusherChannel};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::default();
/// pusher.register_client(player_id.clone(), tx).await;
/// pusher.push_to(&player_id, "{\"type\":\"assignId\"}").await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// Key: player_id, Value: 送信キュー
    clients: Arc<Mutex<HashMap<PlayerId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<PlayerId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

fn try_push(sender: &PusherChannel, content: &str) -> Result<(), MessagePushError> {
    sender.try_send(content.to_string()).map_err(|e| match e {
        TrySendError::Full(_) => MessagePushError::PushFailed("outbound queue is full".to_string()),
        TrySendError::Closed(_) => {
            MessagePushError::PushFailed("outbound queue is closed".to_string())
        }
    })
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, player_id: PlayerId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Client '{}' registered to MessagePusher", player_id);
        clients.insert(player_id, sender);
    }

    async fn unregister_client(&self, player_id: &PlayerId) {
        let mut clients = self.clients.lock().await;
        clients.remove(player_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", player_id);
    }

    async fn push_to(&self, player_id: &PlayerId, content: &str) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(player_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(player_id.as_str().to_string()))?;
        try_push(sender, content)?;
        tracing::trace!("Pushed message to client '{}'", player_id);
        Ok(())
    }

    async fn broadcast(&self, targets: Vec<PlayerId>, content: &str) -> usize {
        let clients = self.clients.lock().await;

        let mut delivered = 0;
        for target in targets {
            match clients.get(&target) {
                Some(sender) => match try_push(sender, content) {
                    Ok(()) => delivered += 1,
                    Err(e) => tracing::debug!("Skipping client '{}': {}", target, e),
                },
                None => tracing::debug!("Client '{}' not found during broadcast, skipping", target),
            }
        }

        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定のクライアントへの送信
    // - broadcast: 複数クライアントへの送信と、書き込めない接続のスキップ
    //
    // 【どのようなシナリオをテストするか】
    // 1. push_to の成功ケース / クライアントが存在しないケース
    // 2. broadcast の成功ケース
    // 3. broadcast の部分失敗ケース（存在しない・キュー満杯・キュー切断）
    // ========================================

    fn player_id(value: &str) -> PlayerId {
        PlayerId::new(value.to_string()).unwrap()
    }

    fn create_test_pusher() -> (
        WebSocketMessagePusher,
        Arc<Mutex<HashMap<PlayerId, PusherChannel>>>,
    ) {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        let pusher = WebSocketMessagePusher::new(clients.clone());
        (pusher, clients)
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のクライアントにメッセージを送信できる
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx, mut rx) = mpsc::channel(8);
        let alice = player_id("player-alice");
        pusher.register_client(alice.clone(), tx).await;

        // when (操作):
        let result = pusher.push_to(&alice, "Hello").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("Hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しないクライアントへの送信はエラーを返す
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();

        // when (操作):
        let result = pusher.push_to(&player_id("player-ghost"), "Hello").await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessagePushError::ClientNotFound("player-ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_unregister_client() {
        // テスト項目: 登録解除したクライアントには送信されない
        // given (前提条件):
        let (pusher, clients) = create_test_pusher();
        let (tx, _rx) = mpsc::channel(8);
        let alice = player_id("player-alice");
        pusher.register_client(alice.clone(), tx).await;

        // when (操作):
        pusher.unregister_client(&alice).await;

        // then (期待する結果):
        assert!(clients.lock().await.is_empty());
        assert!(pusher.push_to(&alice, "Hello").await.is_err());
    }

    #[tokio::test]
    async fn test_broadcast_success() {
        // テスト項目: 複数のクライアントにメッセージをブロードキャストできる
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx1, mut rx1) = mpsc::channel(8);
        let (tx2, mut rx2) = mpsc::channel(8);
        let alice = player_id("player-alice");
        let bob = player_id("player-bob");
        pusher.register_client(alice.clone(), tx1).await;
        pusher.register_client(bob.clone(), tx2).await;

        // when (操作):
        let delivered = pusher.broadcast(vec![alice, bob], "Broadcast").await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert_eq!(rx1.recv().await, Some("Broadcast".to_string()));
        assert_eq!(rx2.recv().await, Some("Broadcast".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_skips_unwritable_clients() {
        // テスト項目: 存在しない・キュー満杯・切断済みのクライアントはスキップされる
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx_ok, mut rx_ok) = mpsc::channel(8);
        let (tx_full, mut rx_full) = mpsc::channel(1);
        let (tx_closed, rx_closed) = mpsc::channel(8);
        tx_full.try_send("backlog".to_string()).unwrap();
        drop(rx_closed);

        let ok = player_id("player-ok");
        let full = player_id("player-full");
        let closed = player_id("player-closed");
        pusher.register_client(ok.clone(), tx_ok).await;
        pusher.register_client(full.clone(), tx_full).await;
        pusher.register_client(closed.clone(), tx_closed).await;

        // when (操作):
        let targets = vec![ok, full, closed, player_id("player-ghost")];
        let delivered = pusher.broadcast(targets, "Broadcast").await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(rx_ok.recv().await, Some("Broadcast".to_string()));
        assert_eq!(rx_full.recv().await, Some("backlog".to_string()));
        assert!(rx_full.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // テスト項目: 空のターゲットリストでも問題なく処理される
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();

        // when (操作):
        let delivered = pusher.broadcast(vec![], "Message").await;

        // then (期待する結果):
        assert_eq!(delivered, 0);
    }
}
