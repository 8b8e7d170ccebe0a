//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{PlayerCommand, PlayerId, PlayerSnapshot, PlayerState, RepositoryError};

/// Player Repository trait
///
/// Store of the last-known state of every connected player. The key set must
/// always equal the set of connected players: entries are added on connect and
/// removed on disconnect, never created as a side effect of a command.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// プレイヤーを追加
    async fn add_player(
        &self,
        player_id: PlayerId,
        state: PlayerState,
    ) -> Result<(), RepositoryError>;

    /// プレイヤーを削除
    async fn remove_player(&self, player_id: &PlayerId) -> Result<(), RepositoryError>;

    /// プレイヤーの状態にコマンドを適用
    async fn apply_command(&self, command: PlayerCommand) -> Result<(), RepositoryError>;

    /// プレイヤーが存在するか
    async fn contains_player(&self, player_id: &PlayerId) -> bool;

    /// 接続中の全てのプレイヤー ID を取得
    async fn get_all_player_ids(&self) -> Vec<PlayerId>;

    /// 全プレイヤーの状態のスナップショットを取得
    async fn snapshot(&self) -> PlayerSnapshot;
}
