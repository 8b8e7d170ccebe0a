//! InMemory Player Repository 実装
//!
//! ドメイン層が定義する PlayerRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。プロセス終了とともに消え、永続化はしません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    PlayerCommand, PlayerId, PlayerRepository, PlayerSnapshot, PlayerState, RepositoryError,
};

/// インメモリ Player Repository 実装
#[derive(Default)]
pub struct InMemoryPlayerRepository {
    /// player_id -> 最新の状態
    players: Arc<Mutex<HashMap<PlayerId, PlayerState>>>,
}

impl InMemoryPlayerRepository {
    /// 新しい InMemoryPlayerRepository を作成
    pub fn new(players: Arc<Mutex<HashMap<PlayerId, PlayerState>>>) -> Self {
        Self { players }
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn add_player(
        &self,
        player_id: PlayerId,
        state: PlayerState,
    ) -> Result<(), RepositoryError> {
        let mut players = self.players.lock().await;
        if players.contains_key(&player_id) {
            return Err(RepositoryError::DuplicatePlayer(player_id.into_string()));
        }
        players.insert(player_id, state);
        Ok(())
    }

    async fn remove_player(&self, player_id: &PlayerId) -> Result<(), RepositoryError> {
        let mut players = self.players.lock().await;
        players
            .remove(player_id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::PlayerNotFound(player_id.as_str().to_string()))
    }

    async fn apply_command(&self, command: PlayerCommand) -> Result<(), RepositoryError> {
        let mut players = self.players.lock().await;
        let player_id = command.player_id().clone();
        let current = players
            .get_mut(&player_id)
            .ok_or_else(|| RepositoryError::PlayerNotFound(player_id.as_str().to_string()))?;

        if command.apply_to(current) {
            Ok(())
        } else {
            Err(RepositoryError::StateNotObject(player_id.into_string()))
        }
    }

    async fn contains_player(&self, player_id: &PlayerId) -> bool {
        let players = self.players.lock().await;
        players.contains_key(player_id)
    }

    async fn get_all_player_ids(&self) -> Vec<PlayerId> {
        let players = self.players.lock().await;
        players.keys().cloned().collect()
    }

    async fn snapshot(&self) -> PlayerSnapshot {
        let players = self.players.lock().await;
        players
            .iter()
            .map(|(id, state)| (id.clone(), state.clone()))
            .collect()
    }
}
