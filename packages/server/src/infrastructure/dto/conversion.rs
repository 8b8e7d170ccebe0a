//! Conversion logic between DTOs and domain entities.

use crate::domain::{PlayerCommand, PlayerId, PlayerSnapshot, PlayerState};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain
// ========================================

impl dto::InboundMessage {
    /// The store mutation this message asks for, applied to `sender`.
    ///
    /// `None` means relay-only.
    pub fn into_command(self, sender: PlayerId) -> Option<PlayerCommand> {
        match self {
            Self::Update { player_data } => Some(PlayerCommand::ReplaceState {
                player_id: sender,
                state: PlayerState::new(player_data),
            }),
            Self::Shoot { bullets } => Some(PlayerCommand::ReplaceProjectiles {
                player_id: sender,
                bullets,
            }),
            Self::Other => None,
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl dto::AssignIdMessage {
    pub fn new(player_id: &PlayerId, state: &PlayerState) -> Self {
        Self {
            r#type: dto::MessageType::AssignId,
            player_id: player_id.as_str().to_string(),
            player_data: state.as_value().clone(),
        }
    }
}

impl dto::PlayerDisconnectedMessage {
    pub fn new(player_id: &PlayerId) -> Self {
        Self {
            r#type: dto::MessageType::PlayerDisconnected,
            player_id: player_id.as_str().to_string(),
        }
    }
}

impl From<PlayerSnapshot> for dto::PlayersUpdateMessage {
    fn from(snapshot: PlayerSnapshot) -> Self {
        Self {
            r#type: dto::MessageType::PlayersUpdate,
            players: snapshot
                .into_iter()
                .map(|(id, state)| (id.into_string(), state.into_value()))
                .collect(),
        }
    }
}

impl From<PlayerSnapshot> for http::PlayersDebugDto {
    fn from(snapshot: PlayerSnapshot) -> Self {
        Self {
            count: snapshot.len(),
            players: snapshot
                .into_iter()
                .map(|(id, state)| (id.into_string(), state.into_value()))
                .collect(),
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
    fn test_update_becomes_replace_state_for_sender() {
        // テスト項目: update はペイロードの playerId ではなく送信者に対する ReplaceState になる
        // given (前提条件):
        let inbound = dto::InboundMessage::parse(
            r#"{"type":"update","playerId":"player-mallory","playerData":{"x":7}}"#,
        )
        .unwrap();

        // when (操作):
        let command = inbound.into_command(alice());

        // then (期待する結果):
        assert_eq!(
            command,
            Some(PlayerCommand::ReplaceState {
                player_id: alice(),
                state: PlayerState::new(json!({"x": 7})),
            })
        );
    }

    #[test]
    fn test_shoot_becomes_replace_projectiles() {
        // テスト項目: shoot は ReplaceProjectiles になる
        // given (前提条件):
        let inbound = dto::InboundMessage::Shoot {
            bullets: json!([{"x": 1}]),
        };

        // when (操作):
        let command = inbound.into_command(alice());

        // then (期待する結果):
        assert_eq!(
            command,
            Some(PlayerCommand::ReplaceProjectiles {
                player_id: alice(),
                bullets: json!([{"x": 1}]),
            })
        );
    }

    #[test]
    fn test_other_becomes_no_command() {
        // テスト項目: 未知の種類はコマンドにならない（中継のみ）
        // when (操作):
        let command = dto::InboundMessage::Other.into_command(alice());

        // then (期待する結果):
        assert_eq!(command, None);
    }

    #[test]
    fn test_snapshot_to_players_update() {
        // テスト項目: スナップショットが playersUpdate と debug DTO に変換される
        // given (前提条件):
        let snapshot = PlayerSnapshot::from([(alice(), PlayerState::new(json!({"x": 1})))]);

        // when (操作):
        let message: dto::PlayersUpdateMessage = snapshot.clone().into();
        let debug: http::PlayersDebugDto = snapshot.into();

        // then (期待する結果):
        assert_eq!(message.r#type, dto::MessageType::PlayersUpdate);
        assert_eq!(message.players.get("player-alice"), Some(&json!({"x": 1})));
        assert_eq!(debug.count, 1);
        assert_eq!(debug.players, message.players);
    }
}
