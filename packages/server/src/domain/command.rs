//! State mutations requested by a player.

use serde_json::Value;

use super::{PlayerId, PlayerState};

/// A mutation of one player's stored state.
///
/// `update` messages replace the whole record, `shoot` messages replace only
/// the projectile list. Message kinds that map to no command are relayed
/// without touching the store.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    ReplaceState {
        player_id: PlayerId,
        state: PlayerState,
    },
    ReplaceProjectiles {
        player_id: PlayerId,
        bullets: Value,
    },
}

impl PlayerCommand {
    pub fn player_id(&self) -> &PlayerId {
        match self {
            Self::ReplaceState { player_id, .. } | Self::ReplaceProjectiles { player_id, .. } => {
                player_id
            }
        }
    }

    /// Apply the command to the player's current state.
    ///
    /// Returns `false` if the mutation could not be applied (projectiles on a
    /// non-object state); the state is left unchanged in that case.
    pub fn apply_to(self, current: &mut PlayerState) -> bool {
        match self {
            Self::ReplaceState { state, .. } => {
                *current = state;
                true
            }
            Self::ReplaceProjectiles { bullets, .. } => current.replace_bullets(bullets),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn alice() -> PlayerId {
        PlayerId::new("player-alice".to_string()).unwrap()
    }

    #[test]
    fn test_replace_state_is_not_merged() {
        // テスト項目: ReplaceState は既存の状態をマージせずに丸ごと置き換える
        // given (前提条件):
        let mut current = PlayerState::new(json!({"x": 1, "y": 2, "health": 100}));
        let command = PlayerCommand::ReplaceState {
            player_id: alice(),
            state: PlayerState::new(json!({"x": 9})),
        };

        // when (操作):
        let applied = command.apply_to(&mut current);

        // then (期待する結果):
        assert!(applied);
        assert_eq!(current.as_value(), &json!({"x": 9}));
    }

    #[test]
    fn test_replace_projectiles_only_touches_bullets() {
        // テスト項目: ReplaceProjectiles は bullets フィールドのみを置き換える
        // given (前提条件):
        let mut current = PlayerState::new(json!({"x": 1, "bullets": [{"x": 0}]}));
        let command = PlayerCommand::ReplaceProjectiles {
            player_id: alice(),
            bullets: json!([]),
        };

        // when (操作):
        let applied = command.apply_to(&mut current);

        // then (期待する結果):
        assert!(applied);
        assert_eq!(current.as_value(), &json!({"x": 1, "bullets": []}));
    }

    #[test]
    fn test_player_id_accessor() {
        // テスト項目: どのバリアントからも対象プレイヤー ID を取得できる
        // given (前提条件):
        let command = PlayerCommand::ReplaceProjectiles {
            player_id: alice(),
            bullets: json!([]),
        };

        // when (操作) / then (期待する結果):
        assert_eq!(command.player_id(), &alice());
    }
}
