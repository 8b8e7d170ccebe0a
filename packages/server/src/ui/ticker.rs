//! Periodic full-sync broadcaster.

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};

use crate::usecase::SyncPlayersUseCase;

/// Spawn the task that broadcasts the whole store every `period`.
///
/// Runs until aborted, whether or not anyone is connected. Late ticks are
/// skipped rather than fired in a burst.
pub fn spawn_sync_ticker(usecase: Arc<SyncPlayersUseCase>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // The first tick fires immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match usecase.execute().await {
                Ok(delivered) => tracing::trace!("Full-sync queued for {} player(s)", delivered),
                Err(e) => tracing::warn!("Full-sync failed: {}", e),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessagePusher, PlayerId, PlayerRepository, PlayerState},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryPlayerRepository,
        },
        usecase::EventSequencer,
    };
    use serde_json::json;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_ticker_broadcasts_repeatedly() {
        // テスト項目: ticker が一定間隔で playersUpdate を繰り返し送信する
        // given (前提条件):
        let repository = Arc::new(InMemoryPlayerRepository::default());
        let message_pusher = Arc::new(WebSocketMessagePusher::default());
        let alice = PlayerId::new("player-alice".to_string()).unwrap();
        let (tx, mut rx) = mpsc::channel(64);
        repository
            .add_player(alice.clone(), PlayerState::new(json!({"x": 1})))
            .await
            .unwrap();
        message_pusher.register_client(alice, tx).await;
        let usecase = Arc::new(SyncPlayersUseCase::new(
            repository,
            message_pusher,
            Arc::new(EventSequencer::new()),
        ));

        // when (操作):
        let handle = spawn_sync_ticker(usecase, Duration::from_millis(10));

        // then (期待する結果):
        for _ in 0..3 {
            let message = tokio::time::timeout(Duration::from_secs(1), rx.recv())
                .await
                .expect("full-sync should arrive")
                .unwrap();
            let value: serde_json::Value = serde_json::from_str(&message).unwrap();
            assert_eq!(value["type"], "playersUpdate");
            assert_eq!(value["players"]["player-alice"], json!({"x": 1}));
        }
        handle.abort();
    }
}
