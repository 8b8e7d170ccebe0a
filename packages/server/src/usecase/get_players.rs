//! UseCase: 全プレイヤーの状態取得

use std::sync::Arc;

use crate::domain::{PlayerRepository, PlayerSnapshot};

/// 全プレイヤーの状態取得のユースケース
pub struct GetPlayersUseCase {
    repository: Arc<dyn PlayerRepository>,
}

impl GetPlayersUseCase {
    pub fn new(repository: Arc<dyn PlayerRepository>) -> Self {
        Self { repository }
    }

    /// 現在のスナップショットを返す（読み取りのみ）
    pub async fn execute(&self) -> PlayerSnapshot {
        self.repository.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockPlayerRepository, PlayerId, PlayerState};
    use serde_json::json;

    #[tokio::test]
    async fn test_get_players_returns_repository_snapshot() {
        // テスト項目: Repository のスナップショットがそのまま返される
        // given (前提条件):
        let alice = PlayerId::new("player-alice".to_string()).unwrap();
        let expected = PlayerSnapshot::from([(alice, PlayerState::new(json!({"x": 1})))]);
        let mut repository = MockPlayerRepository::new();
        let returned = expected.clone();
        repository
            .expect_snapshot()
            .times(1)
            .returning(move || returned.clone());
        let usecase = GetPlayersUseCase::new(Arc::new(repository));

        // when (操作):
        let snapshot = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(snapshot, expected);
    }
}
