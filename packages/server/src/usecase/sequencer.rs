//! Serialization point for relay events.

use tokio::sync::{Mutex, MutexGuard};

/// Orders connect, relay, disconnect and full-sync events into one stream.
///
/// The guard is held for the whole event (store mutation plus fan-out).
/// Fan-out only enqueues into bounded per-connection queues, so the critical
/// section never waits on a socket.
#[derive(Debug, Default)]
pub struct EventSequencer {
    lock: Mutex<()>,
}

impl EventSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to the event stream.
    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, time::Duration};

    #[tokio::test]
    async fn test_enter_is_exclusive() {
        // テスト項目: ガードを保持している間、他のイベントは開始できない
        // given (前提条件):
        let sequencer = Arc::new(EventSequencer::new());
        let guard = sequencer.enter().await;

        // when (操作):
        let waiter = {
            let sequencer = sequencer.clone();
            tokio::spawn(async move {
                let _guard = sequencer.enter().await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        // then (期待する結果):
        assert!(!waiter.is_finished());
        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should acquire the sequencer")
            .unwrap();
    }
}
